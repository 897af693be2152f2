// native_surface/src/surface.rs
//
//! Information related to drawable targets and the surfaces bound to them.

use euclid::default::Size2D;
use std::fmt::{self, Display, Formatter};

/// Various data about a surface bound to a drawable target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceInfo {
    /// The surface's size, in device pixels.
    pub size: Size2D<i32>,
    /// The ID of the surface. This should be globally unique for each currently-allocated surface.
    pub id: SurfaceID,
}

/// An opaque identifier for a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceID(pub usize);

impl Display for SurfaceID {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", *self)
    }
}

/// An opaque identifier for the consumer side of a texture stream.
///
/// Hosts may hand out a fresh native handle for the same logical stream on every callback, so
/// the handle's address is not necessarily a usable identity. Each device decides what the ID
/// is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StreamID(pub u64);

impl Display for StreamID {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", *self)
    }
}

/// A drawable target that can be attached to a binding.
pub enum SurfaceTarget<NativeWidget, NativeStream> {
    /// A ready-to-present surface, handed to the binding as-is.
    Direct { native_widget: NativeWidget },
    /// The consumer side of a producer/consumer texture stream. The binding derives its own
    /// presentable widget from it before attaching.
    Stream { native_stream: NativeStream },
}

/// Whether a binding currently holds a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingState {
    /// No drawable target is attached. This is the initial state.
    Unbound,
    /// A drawable target is attached and its native surface is alive.
    Bound,
}

impl BindingState {
    #[inline]
    pub fn is_bound(self) -> bool {
        self == BindingState::Bound
    }
}
