// native_surface/src/adapter/direct.rs
//
//! Adapter for hosts that hand out directly presentable surfaces.

use crate::binding::SurfaceBinding;
use crate::context::RenderingContext;
use crate::device::Device;
use crate::{BindingState, Error, SurfaceTarget};

use euclid::default::Size2D;
use log::{debug, warn};

/// Maps a created / changed / destroyed surface lifecycle onto a `SurfaceBinding`.
///
/// The native widget is assumed to stay the same across size changes, so a change only
/// triggers a redraw.
#[derive(Debug)]
pub struct DirectSurfaceAdapter<'c, D: Device> {
    binding: SurfaceBinding<'c, D>,
    size: Option<Size2D<i32>>,
}

impl<'c, D: Device> DirectSurfaceAdapter<'c, D> {
    #[inline]
    pub fn new(context: &'c RenderingContext<D>) -> DirectSurfaceAdapter<'c, D> {
        DirectSurfaceAdapter { binding: SurfaceBinding::new(context), size: None }
    }

    #[inline]
    pub fn binding(&self) -> &SurfaceBinding<'c, D> {
        &self.binding
    }

    #[inline]
    pub fn state(&self) -> BindingState {
        self.binding.state()
    }

    /// The size most recently reported by the host, in device pixels.
    #[inline]
    pub fn size(&self) -> Option<Size2D<i32>> {
        self.size
    }

    /// The host created the surface.
    pub fn surface_created(&mut self, native_widget: D::NativeWidget) -> Result<(), Error> {
        debug!("surface created");
        self.binding
            .attach(SurfaceTarget::Direct { native_widget })
            .map_err(|err| rejected("surface_created", err))
    }

    /// The host changed the surface's size. The surface is re-rendered at the new size.
    pub fn surface_changed(&mut self, size: Size2D<i32>) -> Result<(), Error> {
        debug!("surface changed to {}x{}", size.width, size.height);
        self.binding.redraw().map_err(|err| rejected("surface_changed", err))?;
        self.size = Some(size);
        Ok(())
    }

    /// The host destroyed the surface.
    pub fn surface_destroyed(&mut self) -> Result<(), Error> {
        debug!("surface destroyed");
        self.size = None;
        self.binding.detach().map_err(|err| rejected("surface_destroyed", err))
    }
}

pub(super) fn rejected(event: &str, err: Error) -> Error {
    warn!("{} failed: {:?}", event, err);
    err
}
