// native_surface/src/adapter/stream.rs
//
//! Adapter for hosts that hand out producer/consumer texture streams.

use super::direct::rejected;
use super::pacing::FramePacing;
use crate::binding::SurfaceBinding;
use crate::context::RenderingContext;
use crate::device::Device;
use crate::{BindingState, Error, StreamID, SurfaceTarget};

use euclid::default::Size2D;
use log::{debug, error, trace};

/// What to do when the host names a different stream than the one attached.
///
/// Hosts may reconstruct the producer-side handle of a stream between callbacks, so a stream
/// reported in a resize, destroy or frame event is not guaranteed to be the attached one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamIdentityPolicy {
    /// Reject the event with `Error::UnexpectedStream`. The attached surface is left alone.
    #[default]
    Reject,
    /// Treat the new stream as a replacement: on resize, detach and attach against it before
    /// redrawing; on destroy, detach as usual; on a consumed frame, record it.
    Rebind,
}

/// Options for a `StreamSurfaceAdapter`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamOptions {
    pub identity: StreamIdentityPolicy,
}

/// Maps an available / size-changed / destroyed / updated stream lifecycle onto a
/// `SurfaceBinding`.
///
/// The host never guarantees a size-changed event after a stream becomes available, so
/// availability attaches and immediately renders the first frame.
#[derive(Debug)]
pub struct StreamSurfaceAdapter<'c, D: Device> {
    binding: SurfaceBinding<'c, D>,
    options: StreamOptions,
    stream_id: Option<StreamID>,
    size: Option<Size2D<i32>>,
    pacing: FramePacing,
}

impl<'c, D: Device> StreamSurfaceAdapter<'c, D> {
    #[inline]
    pub fn new(context: &'c RenderingContext<D>) -> StreamSurfaceAdapter<'c, D> {
        StreamSurfaceAdapter::with_options(context, StreamOptions::default())
    }

    pub fn with_options(context: &'c RenderingContext<D>, options: StreamOptions)
                        -> StreamSurfaceAdapter<'c, D> {
        StreamSurfaceAdapter {
            binding: SurfaceBinding::new(context),
            options,
            stream_id: None,
            size: None,
            pacing: FramePacing::new(),
        }
    }

    #[inline]
    pub fn binding(&self) -> &SurfaceBinding<'c, D> {
        &self.binding
    }

    #[inline]
    pub fn state(&self) -> BindingState {
        self.binding.state()
    }

    #[inline]
    pub fn options(&self) -> StreamOptions {
        self.options
    }

    /// The identity of the attached stream, if any.
    #[inline]
    pub fn stream_id(&self) -> Option<StreamID> {
        self.stream_id
    }

    #[inline]
    pub fn size(&self) -> Option<Size2D<i32>> {
        self.size
    }

    /// Frame-consumption statistics for the current bind cycle.
    #[inline]
    pub fn pacing(&self) -> &FramePacing {
        &self.pacing
    }

    /// The host made a stream available. Attaches to it and renders the first frame.
    pub fn stream_available(&mut self, native_stream: D::NativeStream, size: Size2D<i32>)
                            -> Result<(), Error> {
        let id = self.binding.context().device().native_stream_id(&native_stream);
        debug!("stream {} available at {}x{}", id, size.width, size.height);
        self.attach(native_stream, id, size)
            .map_err(|err| rejected("stream_available", err))
    }

    /// The host changed the stream's buffer size. The stream is re-rendered at the new size.
    pub fn stream_size_changed(&mut self, native_stream: D::NativeStream, size: Size2D<i32>)
                               -> Result<(), Error> {
        let id = self.binding.context().device().native_stream_id(&native_stream);
        debug!("stream {} changed to {}x{}", id, size.width, size.height);
        self.size_changed(native_stream, id, size)
            .map_err(|err| rejected("stream_size_changed", err))
    }

    /// The host destroyed the stream.
    ///
    /// Returns `true` once the binding no longer references the stream, so the host may reclaim
    /// its buffers. This holds even if the device failed to release the surface cleanly; the
    /// failure is logged. Rejected events return an error and leave the binding untouched.
    pub fn stream_destroyed(&mut self, native_stream: &D::NativeStream) -> Result<bool, Error> {
        let id = self.binding.context().device().native_stream_id(native_stream);
        debug!("stream {} destroyed", id);
        self.destroyed(id).map_err(|err| rejected("stream_destroyed", err))
    }

    /// The host consumed a frame from the stream. This is not a lifecycle transition and makes
    /// no native call; it only feeds the pacing statistics.
    pub fn stream_updated(&mut self, native_stream: &D::NativeStream, timestamp_nanos: u64)
                          -> Result<(), Error> {
        let id = self.binding.context().device().native_stream_id(native_stream);
        self.updated(id, timestamp_nanos).map_err(|err| rejected("stream_updated", err))
    }

    fn attach(&mut self, native_stream: D::NativeStream, id: StreamID, size: Size2D<i32>)
              -> Result<(), Error> {
        self.binding.attach(SurfaceTarget::Stream { native_stream })?;
        self.stream_id = Some(id);
        self.size = Some(size);
        self.pacing.reset();
        self.binding.redraw()
    }

    fn size_changed(&mut self, native_stream: D::NativeStream, id: StreamID, size: Size2D<i32>)
                    -> Result<(), Error> {
        if !self.binding.is_bound() {
            return Err(Error::NoSurfaceBound);
        }

        if self.stream_id != Some(id) {
            match self.options.identity {
                StreamIdentityPolicy::Reject => return Err(Error::UnexpectedStream),
                StreamIdentityPolicy::Rebind => {
                    debug!("stream {:?} replaced by {}; rebinding", self.stream_id, id);
                    self.release();
                    return self.attach(native_stream, id, size);
                }
            }
        }

        self.binding.redraw()?;
        self.size = Some(size);
        Ok(())
    }

    fn destroyed(&mut self, id: StreamID) -> Result<bool, Error> {
        self.check_attached(id)?;
        self.release();
        Ok(true)
    }

    fn updated(&mut self, id: StreamID, timestamp_nanos: u64) -> Result<(), Error> {
        self.check_attached(id)?;
        self.pacing.record(timestamp_nanos);
        trace!("stream {} consumed frame {} at {}ns", id, self.pacing.frames(), timestamp_nanos);
        Ok(())
    }

    // Under `Rebind`, any stream is accepted as the attached one.
    fn check_attached(&self, id: StreamID) -> Result<(), Error> {
        if !self.binding.is_bound() {
            return Err(Error::NoSurfaceBound);
        }
        if self.stream_id != Some(id) && self.options.identity == StreamIdentityPolicy::Reject {
            return Err(Error::UnexpectedStream);
        }
        Ok(())
    }

    // Detaches the bound surface. The device has consumed the surface even if it reports an
    // error, so nothing references the stream afterward.
    fn release(&mut self) {
        let id = self.stream_id.take();
        self.size = None;
        if let Err(err) = self.binding.detach() {
            error!("failed to release surface of stream {:?}: {:?}", id, err);
        }
    }
}
