// native_surface/src/binding.rs
//
//! The state machine that binds one drawable target at a time to the shared context.

use crate::context::RenderingContext;
use crate::device::Device;
use crate::{BindingState, Error, SurfaceInfo, SurfaceTarget};

use log::{debug, error, trace, warn};
use std::fmt::{self, Debug, Formatter};

/// Binds at most one drawable target to a shared `RenderingContext`.
///
/// The binding starts `Unbound`. `attach` moves it to `Bound`, `redraw` renders while `Bound`,
/// and `detach` returns it to `Unbound`, after which it can be attached again. Calls made in the
/// wrong state are rejected with an error and never reach the device.
///
/// The native surface is owned exclusively by the binding between `attach` and `detach`. If the
/// binding is dropped while still bound, the surface is released and a warning is logged.
pub struct SurfaceBinding<'c, D: Device> {
    context: &'c RenderingContext<D>,
    surface: Option<D::Surface>,
    frames_presented: u64,
}

impl<'c, D: Device> SurfaceBinding<'c, D> {
    /// Creates an unbound binding against `context`.
    #[inline]
    pub fn new(context: &'c RenderingContext<D>) -> SurfaceBinding<'c, D> {
        SurfaceBinding { context, surface: None, frames_presented: 0 }
    }

    #[inline]
    pub fn context(&self) -> &'c RenderingContext<D> {
        self.context
    }

    #[inline]
    pub fn state(&self) -> BindingState {
        if self.surface.is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    /// Returns information about the bound surface, or `None` if unbound.
    pub fn surface_info(&self) -> Option<SurfaceInfo> {
        self.surface.as_ref().map(|surface| self.context.device().surface_info(surface))
    }

    /// Returns the number of frames rendered since the current target was attached.
    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Allocates native resources for `target` and starts tracking it.
    ///
    /// Returns `SurfaceAlreadyBound` if a target is already attached. If the device fails to
    /// create the surface, the binding stays unbound.
    pub fn attach(
        &mut self,
        target: SurfaceTarget<D::NativeWidget, D::NativeStream>,
    ) -> Result<(), Error> {
        if let Some(ref surface) = self.surface {
            let info = self.context.device().surface_info(surface);
            warn!("attach rejected: surface {} is already bound", info.id);
            return Err(Error::SurfaceAlreadyBound);
        }

        let device = self.context.device();
        let native_widget = match target {
            SurfaceTarget::Direct { native_widget } => native_widget,
            SurfaceTarget::Stream { native_stream } => {
                device.create_native_widget_from_stream(&native_stream)?
            }
        };

        let surface = device.create_surface(self.context.native_context(), native_widget)?;
        let info = device.surface_info(&surface);
        debug!("attached surface {} ({}x{}) to context {:?}",
               info.id,
               info.size.width,
               info.size.height,
               self.context.id());

        self.surface = Some(surface);
        self.frames_presented = 0;
        self.context.surface_bound();
        Ok(())
    }

    /// Renders one frame into the attached target.
    ///
    /// Returns `NoSurfaceBound` without calling the device if nothing is attached.
    pub fn redraw(&mut self) -> Result<(), Error> {
        let surface = match self.surface {
            Some(ref mut surface) => surface,
            None => {
                warn!("redraw rejected: no surface is bound");
                return Err(Error::NoSurfaceBound);
            }
        };

        let device = self.context.device();
        device.present_surface(self.context.native_context(), surface)?;
        self.frames_presented += 1;
        trace!("presented frame {} to surface {}",
               self.frames_presented,
               device.surface_info(surface).id);
        Ok(())
    }

    /// Releases the native resources of the attached target.
    ///
    /// The binding is unbound afterward even if the device reports an error, since the surface
    /// has been handed back to the device and must not be released again.
    pub fn detach(&mut self) -> Result<(), Error> {
        let surface = match self.surface.take() {
            Some(surface) => surface,
            None => {
                warn!("detach rejected: no surface is bound");
                return Err(Error::NoSurfaceBound);
            }
        };

        self.context.surface_unbound();
        self.destroy_surface(surface)
    }

    fn destroy_surface(&mut self, surface: D::Surface) -> Result<(), Error> {
        let device = self.context.device();
        let id = device.surface_info(&surface).id;
        debug!("detaching surface {} after {} frame(s)", id, self.frames_presented);
        self.frames_presented = 0;
        device.destroy_surface(self.context.native_context(), surface)
    }
}

impl<'c, D: Device> Drop for SurfaceBinding<'c, D> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.take() {
            warn!("binding dropped while bound; releasing its surface");
            self.context.surface_unbound();
            if let Err(err) = self.destroy_surface(surface) {
                error!("failed to release surface on drop: {:?}", err);
            }
        }
    }
}

impl<'c, D: Device> Debug for SurfaceBinding<'c, D> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter
            .debug_struct("SurfaceBinding")
            .field("context", &self.context.id())
            .field("surface", &self.surface_info())
            .field("frames_presented", &self.frames_presented)
            .finish()
    }
}
