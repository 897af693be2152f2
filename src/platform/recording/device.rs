// native_surface/src/platform/recording/device.rs
//
//! The recording device and its handle types.

use crate::device::Device as DeviceInterface;
use crate::{ContextAttributes, Error, GLApi, GLVersion, StreamID, SurfaceID, SurfaceInfo};
use crate::WindowingApiError;

use euclid::default::Size2D;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A native call received by a recording device, in the order it was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeCall {
    CreateContext,
    DestroyContext,
    /// A presentable widget was derived from the stream with the given ID.
    CreateWidgetFromStream { stream: u64 },
    CreateSurface { surface: SurfaceID, widget: u64 },
    PresentSurface { surface: SurfaceID },
    DestroySurface { surface: SurfaceID },
}

/// A native call that a recording device can be told to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePoint {
    CreateContext,
    DestroyContext,
    CreateWidgetFromStream,
    CreateSurface,
    PresentSurface,
    DestroySurface,
}

/// A device that records native calls instead of making them.
#[derive(Debug)]
pub struct Device {
    gl_api: GLApi,
    calls: CallLog,
    failures: RefCell<Vec<FailurePoint>>,
    next_surface_id: Cell<usize>,
    live_surfaces: Cell<usize>,
}

/// A shared handle to the calls recorded by a device.
///
/// The handle stays readable after the device itself has been moved into a rendering context
/// and dropped.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Vec<NativeCall>>>);

/// The recorded rendering context.
#[derive(Debug)]
pub struct Context {
    attributes: ContextAttributes,
    destroyed: bool,
}

/// A directly presentable target, identified by a host-chosen number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeWidget {
    pub id: u64,
    pub size: Size2D<i32>,
}

/// The consumer side of a texture stream, identified by a host-chosen number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeStream {
    pub id: u64,
    pub size: Size2D<i32>,
}

/// A recorded surface.
#[derive(Debug)]
pub struct Surface {
    id: SurfaceID,
    native_widget: NativeWidget,
}

impl Default for Device {
    #[inline]
    fn default() -> Device {
        Device::with_gl_api(GLApi::GLES)
    }
}

impl Device {
    /// Creates a device that emulates OpenGL ES.
    #[inline]
    pub fn new() -> Device {
        Device::default()
    }

    /// Creates a device that emulates the given API flavor.
    pub fn with_gl_api(gl_api: GLApi) -> Device {
        Device {
            gl_api,
            calls: CallLog::default(),
            failures: RefCell::new(vec![]),
            next_surface_id: Cell::new(0),
            live_surfaces: Cell::new(0),
        }
    }

    /// Returns true if contexts of `version` can be created on this device.
    ///
    /// OpenGL 2 through 4 and OpenGL ES 2 through 3 are accepted, regardless of minor version.
    pub fn supports_version(&self, version: GLVersion) -> bool {
        match self.gl_api {
            GLApi::GL => (2..=4).contains(&version.major),
            GLApi::GLES => (2..=3).contains(&version.major),
        }
    }

    /// Makes the next call at `point` fail. Failures queue up and are consumed in order.
    pub fn fail_next(&self, point: FailurePoint) {
        self.failures.borrow_mut().push(point);
    }

    /// Returns a copy of every call recorded so far.
    #[inline]
    pub fn calls(&self) -> Vec<NativeCall> {
        self.calls.calls()
    }

    /// Removes and returns every call recorded so far.
    #[inline]
    pub fn take_calls(&self) -> Vec<NativeCall> {
        self.calls.take()
    }

    #[inline]
    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    /// Returns the number of surfaces created and not yet destroyed.
    #[inline]
    pub fn live_surfaces(&self) -> usize {
        self.live_surfaces.get()
    }

    fn record(&self, call: NativeCall) {
        self.calls.0.borrow_mut().push(call);
    }

    fn should_fail(&self, point: FailurePoint) -> bool {
        let mut failures = self.failures.borrow_mut();
        match failures.iter().position(|&failure| failure == point) {
            Some(index) => {
                failures.remove(index);
                true
            }
            None => false,
        }
    }
}

impl CallLog {
    pub fn calls(&self) -> Vec<NativeCall> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<NativeCall> {
        self.0.replace(vec![])
    }
}

impl Context {
    #[inline]
    pub fn attributes(&self) -> ContextAttributes {
        self.attributes
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl NativeWidget {
    #[inline]
    pub fn new(id: u64, size: Size2D<i32>) -> NativeWidget {
        NativeWidget { id, size }
    }
}

impl NativeStream {
    #[inline]
    pub fn new(id: u64, size: Size2D<i32>) -> NativeStream {
        NativeStream { id, size }
    }
}

impl Surface {
    #[inline]
    pub fn id(&self) -> SurfaceID {
        self.id
    }

    #[inline]
    pub fn native_widget(&self) -> NativeWidget {
        self.native_widget
    }
}

impl DeviceInterface for Device {
    type Context = Context;
    type Surface = Surface;
    type NativeWidget = NativeWidget;
    type NativeStream = NativeStream;

    #[inline]
    fn gl_api(&self) -> GLApi {
        self.gl_api
    }

    fn create_context(&mut self, attributes: &ContextAttributes) -> Result<Context, Error> {
        self.record(NativeCall::CreateContext);
        if !self.supports_version(attributes.version) {
            return Err(Error::UnsupportedGLVersion);
        }
        if self.should_fail(FailurePoint::CreateContext) {
            return Err(Error::ContextCreationFailed(WindowingApiError::NotInitialized));
        }
        Ok(Context { attributes: *attributes, destroyed: false })
    }

    fn destroy_context(&mut self, context: &mut Context) -> Result<(), Error> {
        self.record(NativeCall::DestroyContext);
        context.destroyed = true;
        if self.should_fail(FailurePoint::DestroyContext) {
            return Err(Error::ContextDestructionFailed(WindowingApiError::BadContext));
        }
        Ok(())
    }

    fn create_native_widget_from_stream(&self, native_stream: &NativeStream)
                                        -> Result<NativeWidget, Error> {
        self.record(NativeCall::CreateWidgetFromStream { stream: native_stream.id });
        if self.should_fail(FailurePoint::CreateWidgetFromStream) {
            return Err(Error::InvalidNativeWidget);
        }
        Ok(NativeWidget { id: native_stream.id, size: native_stream.size })
    }

    #[inline]
    fn native_stream_id(&self, native_stream: &NativeStream) -> StreamID {
        StreamID(native_stream.id)
    }

    fn create_surface(&self, context: &Context, native_widget: NativeWidget)
                      -> Result<Surface, Error> {
        debug_assert!(!context.destroyed);

        let id = SurfaceID(self.next_surface_id.get());
        self.next_surface_id.set(id.0 + 1);
        self.record(NativeCall::CreateSurface { surface: id, widget: native_widget.id });
        if self.should_fail(FailurePoint::CreateSurface) {
            return Err(Error::SurfaceCreationFailed(WindowingApiError::BadNativeWindow));
        }

        self.live_surfaces.set(self.live_surfaces.get() + 1);
        Ok(Surface { id, native_widget })
    }

    fn present_surface(&self, _: &Context, surface: &mut Surface) -> Result<(), Error> {
        self.record(NativeCall::PresentSurface { surface: surface.id });
        if self.should_fail(FailurePoint::PresentSurface) {
            return Err(Error::PresentFailed(WindowingApiError::BadSurface));
        }
        Ok(())
    }

    fn destroy_surface(&self, _: &Context, surface: Surface) -> Result<(), Error> {
        self.record(NativeCall::DestroySurface { surface: surface.id });
        self.live_surfaces.set(self.live_surfaces.get().saturating_sub(1));
        if self.should_fail(FailurePoint::DestroySurface) {
            return Err(Error::SurfaceDestructionFailed(WindowingApiError::BadSurface));
        }
        Ok(())
    }

    #[inline]
    fn surface_info(&self, surface: &Surface) -> SurfaceInfo {
        SurfaceInfo { size: surface.native_widget.size, id: surface.id }
    }
}
