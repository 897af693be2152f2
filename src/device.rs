// native_surface/src/device.rs
//
//! The abstract interface that all rendering devices conform to.

use crate::{ContextAttributes, Error, GLApi, StreamID, SurfaceInfo};

/// A handle to the native rendering layer.
///
/// A device creates the shared rendering context and the per-target surfaces bound to it.
/// Everything that touches the GPU goes through here; `SurfaceBinding` only decides *when*
/// these methods may be called.
///
/// Devices are used from the single controlling thread. Methods called by bindings take
/// `&self`, so implementations that keep bookkeeping use interior mutability.
pub trait Device: Sized {
    /// The native rendering context shared by every binding.
    type Context;
    /// The native resources allocated for one bound drawable target.
    type Surface;
    /// A directly presentable drawable target, such as a native window.
    type NativeWidget;
    /// The consumer side of a producer/consumer texture stream.
    type NativeStream;

    /// Returns the OpenGL API flavor that this device supports (OpenGL or OpenGL ES).
    fn gl_api(&self) -> GLApi;

    /// Creates the shared rendering context.
    ///
    /// The context initially has no surface attached.
    fn create_context(&mut self, attributes: &ContextAttributes) -> Result<Self::Context, Error>;

    /// Destroys the shared rendering context.
    ///
    /// All surfaces created against it must already have been destroyed.
    fn destroy_context(&mut self, context: &mut Self::Context) -> Result<(), Error>;

    /// Derives a presentable widget from the consumer side of a texture stream.
    ///
    /// The returned widget is independent of `native_stream`; the stream may be dropped
    /// afterward.
    fn create_native_widget_from_stream(
        &self,
        native_stream: &Self::NativeStream,
    ) -> Result<Self::NativeWidget, Error>;

    /// Returns the identity of a texture stream.
    fn native_stream_id(&self, native_stream: &Self::NativeStream) -> StreamID;

    /// Allocates the native resources needed to render into `native_widget`.
    ///
    /// The surface takes ownership of the widget.
    fn create_surface(
        &self,
        context: &Self::Context,
        native_widget: Self::NativeWidget,
    ) -> Result<Self::Surface, Error>;

    /// Renders and presents one frame to the surface at its current size.
    fn present_surface(&self, context: &Self::Context, surface: &mut Self::Surface)
                       -> Result<(), Error>;

    /// Releases the surface's native resources.
    ///
    /// The surface is consumed even on failure, so it can never be released twice.
    fn destroy_surface(&self, context: &Self::Context, surface: Self::Surface)
                       -> Result<(), Error>;

    /// Returns various information about the surface.
    fn surface_info(&self, surface: &Self::Surface) -> SurfaceInfo;
}
