// native_surface/src/context.rs
//
//! The shared rendering context, and declarations common to all platform contexts.

use crate::device::Device;
use crate::info::GLVersion;
use crate::Error;

use bitflags::bitflags;
use log::{debug, error};
use std::cell::Cell;
use std::fmt::{self, Debug, Formatter};
use std::sync::Mutex;

/// A process-unique ID for a rendering context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextID(pub u64);

pub(crate) static CREATE_CONTEXT_MUTEX: Mutex<ContextID> = Mutex::new(ContextID(0));

bitflags! {
    /// Various flags that control attributes of the context and/or surfaces created from that
    /// context.
    ///
    /// These roughly correspond to:
    /// https://www.khronos.org/registry/webgl/specs/latest/1.0/#WEBGLCONTEXTATTRIBUTES
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ContextAttributeFlags: u8 {
        /// Surfaces created for this context will have an alpha channel (RGBA or BGRA; i.e. 4
        /// channels, 32 bits per pixel, 8 bits per channel). If this is not present, surfaces will
        /// be RGBX or BGRX (i.e. 3 channels, 32 bits per pixel, 8 bits per channel).
        const ALPHA   = 0x01;
        /// Surfaces created for this context will have a 24-bit depth buffer.
        const DEPTH   = 0x02;
        /// Surfaces created for this context will have an 8-bit stencil buffer, possibly using
        /// packed depth/stencil if the GL implementation supports it.
        const STENCIL = 0x04;
    }
}

/// Attributes that control aspects of a context and/or surfaces created from that context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextAttributes {
    /// The OpenGL or OpenGL ES version that this context supports.
    pub version: GLVersion,
    /// Various flags.
    pub flags: ContextAttributeFlags,
}

impl Default for ContextAttributes {
    #[inline]
    fn default() -> ContextAttributes {
        ContextAttributes {
            version: GLVersion::new(3, 0),
            flags: ContextAttributeFlags::ALPHA,
        }
    }
}

/// The native rendering context shared by every surface binding.
///
/// Acquiring one creates the native context; dropping it releases the native context. Bindings
/// borrow the context, so it always outlives them and is released only after every surface
/// has been detached.
pub struct RenderingContext<D: Device> {
    device: D,
    native_context: D::Context,
    id: ContextID,
    attributes: ContextAttributes,
    bound_surfaces: Cell<usize>,
    destroyed: bool,
}

impl<D: Device> RenderingContext<D> {
    /// Creates the shared rendering context on `device`.
    ///
    /// Failure is unrecoverable; the host should disable native rendering.
    pub fn new(mut device: D, attributes: &ContextAttributes) -> Result<RenderingContext<D>, Error> {
        let mut next_context_id = CREATE_CONTEXT_MUTEX.lock().unwrap_or_else(|err| err.into_inner());

        let native_context = device.create_context(attributes)?;
        let id = *next_context_id;
        next_context_id.0 += 1;

        debug!("created rendering context {:?} ({:?}, {:?})", id, device.gl_api(), attributes);
        Ok(RenderingContext {
            device,
            native_context,
            id,
            attributes: *attributes,
            bound_surfaces: Cell::new(0),
            destroyed: false,
        })
    }

    /// Destroys the context, reporting any error from the native layer.
    ///
    /// Dropping the context has the same effect but can only log the error.
    pub fn destroy(mut self) -> Result<(), Error> {
        self.release()
    }

    fn release(&mut self) -> Result<(), Error> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;

        debug_assert_eq!(self.bound_surfaces.get(), 0);
        debug!("destroying rendering context {:?}", self.id);
        self.device.destroy_context(&mut self.native_context)
    }

    #[inline]
    pub fn id(&self) -> ContextID {
        self.id
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn native_context(&self) -> &D::Context {
        &self.native_context
    }

    /// Returns the attributes that the context was created with.
    #[inline]
    pub fn attributes(&self) -> ContextAttributes {
        self.attributes
    }

    /// Returns the number of bindings that currently hold a surface against this context.
    #[inline]
    pub fn bound_surface_count(&self) -> usize {
        self.bound_surfaces.get()
    }

    pub(crate) fn surface_bound(&self) {
        self.bound_surfaces.set(self.bound_surfaces.get() + 1);
    }

    pub(crate) fn surface_unbound(&self) {
        self.bound_surfaces.set(self.bound_surfaces.get().saturating_sub(1));
    }
}

impl<D: Device> Drop for RenderingContext<D> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            error!("failed to destroy rendering context {:?}: {:?}", self.id, err);
        }
    }
}

impl<D: Device> Debug for RenderingContext<D> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter
            .debug_struct("RenderingContext")
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("bound_surfaces", &self.bound_surfaces.get())
            .finish()
    }
}
