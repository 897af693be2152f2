// native_surface/src/platform/android/device.rs
//
//! A thread-local handle to the EGL display.

use super::context::{self, Context};
use super::error::ToWindowingApiError;
use super::ffi::ASurfaceTexture_acquireANativeWindow;
use super::surface::{NativeStream, NativeWidget, Surface};
use crate::device::Device as DeviceInterface;
use crate::egl::types::{EGLDisplay, EGLint};
use crate::egl::{self, Egl};
use crate::{ContextAttributes, Error, GLApi, StreamID, SurfaceInfo};

use glow::HasContext;
use libc::{dlopen, dlsym, RTLD_LAZY};
use log::{debug, error};
use std::ffi::CString;
use std::fmt::{self, Debug, Formatter};
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::OnceLock;

thread_local! {
    pub(crate) static EGL_FUNCTIONS: Egl = Egl::load_with(get_proc_address);
}

/// A handle returned by `dlopen`. Never closed.
pub(crate) struct Library(pub(crate) *mut c_void);

unsafe impl Send for Library {}
unsafe impl Sync for Library {}

static EGL_LIBRARY: OnceLock<Library> = OnceLock::new();

// The color every frame is cleared to.
const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 0.9];

/// A handle to the EGL display that contexts and surfaces are created on.
pub struct Device {
    pub(crate) egl_display: EGLDisplay,
    display_is_owned: bool,
}

impl Drop for Device {
    fn drop(&mut self) {
        if !self.display_is_owned {
            return;
        }
        EGL_FUNCTIONS.with(|egl| unsafe {
            if egl.Terminate(self.egl_display) == egl::FALSE {
                error!("failed to terminate EGL display: {:?}",
                       egl.GetError().to_windowing_api_error());
            }
        });
    }
}

impl Debug for Device {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "Device({:?})", self.egl_display)
    }
}

impl Device {
    /// Opens and initializes the default EGL display.
    pub fn new() -> Result<Device, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_display = egl.GetDisplay(egl::DEFAULT_DISPLAY);
            if egl_display == egl::NO_DISPLAY {
                return Err(Error::DeviceOpenFailed);
            }

            let (mut major_version, mut minor_version) = (0, 0);
            let result = egl.Initialize(egl_display, &mut major_version, &mut minor_version);
            if result == egl::FALSE {
                return Err(Error::DeviceOpenFailed);
            }

            debug!("initialized EGL {}.{}", major_version, minor_version);
            Ok(Device { egl_display, display_is_owned: true })
        })
    }

    /// Wraps an existing, already initialized `EGLDisplay`.
    ///
    /// The display is not terminated when the device is dropped; the caller must keep it alive
    /// for as long as this device exists.
    #[inline]
    pub unsafe fn from_native_display(egl_display: EGLDisplay) -> Device {
        Device { egl_display, display_is_owned: false }
    }

    #[inline]
    pub fn native_display(&self) -> EGLDisplay {
        self.egl_display
    }
}

impl DeviceInterface for Device {
    type Context = Context;
    type Surface = Surface;
    type NativeWidget = NativeWidget;
    type NativeStream = NativeStream;

    #[inline]
    fn gl_api(&self) -> GLApi {
        GLApi::GLES
    }

    #[inline]
    fn create_context(&mut self, attributes: &ContextAttributes) -> Result<Context, Error> {
        self.create_egl_context(attributes)
    }

    #[inline]
    fn destroy_context(&mut self, context: &mut Context) -> Result<(), Error> {
        self.destroy_egl_context(context)
    }

    fn create_native_widget_from_stream(&self, native_stream: &NativeStream)
                                        -> Result<NativeWidget, Error> {
        unsafe {
            let native_window = ASurfaceTexture_acquireANativeWindow(native_stream.surface_texture);
            if native_window.is_null() {
                return Err(Error::InvalidNativeWidget);
            }
            Ok(NativeWidget::from_native_window(native_window))
        }
    }

    #[inline]
    fn native_stream_id(&self, native_stream: &NativeStream) -> StreamID {
        native_stream.id
    }

    fn create_surface(&self, context: &Context, native_widget: NativeWidget)
                      -> Result<Surface, Error> {
        if native_widget.native_window.is_null() {
            return Err(Error::InvalidNativeWidget);
        }

        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_surface = egl.CreateWindowSurface(self.egl_display,
                                                      context.egl_config,
                                                      native_widget.native_window as *const c_void,
                                                      ptr::null());
            if egl_surface == egl::NO_SURFACE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::SurfaceCreationFailed(err));
            }

            Ok(Surface { egl_surface, native_widget, destroyed: false })
        })
    }

    fn present_surface(&self, context: &Context, surface: &mut Surface) -> Result<(), Error> {
        unsafe {
            context::make_current(self.egl_display, surface.egl_surface, context.egl_context)?;

            let size = surface.native_widget.size();
            let [red, green, blue, alpha] = CLEAR_COLOR;
            context.gl.viewport(0, 0, size.width, size.height);
            context.gl.clear_color(red, green, blue, alpha);
            context.gl.clear(glow::COLOR_BUFFER_BIT);

            EGL_FUNCTIONS.with(|egl| {
                if egl.SwapBuffers(self.egl_display, surface.egl_surface) == egl::FALSE {
                    let err = egl.GetError().to_windowing_api_error();
                    return Err(Error::PresentFailed(err));
                }
                Ok(())
            })
        }
    }

    fn destroy_surface(&self, context: &Context, mut surface: Surface) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            // Never leave a destroyed surface current.
            if egl.GetCurrentSurface(egl::DRAW as EGLint) == surface.egl_surface {
                if let Err(err) = self.make_pbuffer_current(context) {
                    error!("failed to retarget context before destroying surface: {:?}", err);
                }
            }

            let result = egl.DestroySurface(self.egl_display, surface.egl_surface);
            surface.egl_surface = egl::NO_SURFACE;
            surface.destroyed = true;
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::SurfaceDestructionFailed(err));
            }
            Ok(())
        })
    }

    #[inline]
    fn surface_info(&self, surface: &Surface) -> SurfaceInfo {
        SurfaceInfo { size: surface.native_widget.size(), id: surface.id() }
    }
}

fn get_proc_address(symbol_name: &str) -> *const c_void {
    let library = EGL_LIBRARY.get_or_init(|| unsafe {
        Library(dlopen(b"libEGL.so\0".as_ptr() as *const c_char, RTLD_LAZY))
    });
    if library.0.is_null() {
        return ptr::null();
    }
    match CString::new(symbol_name) {
        Ok(symbol_name) => unsafe { dlsym(library.0, symbol_name.as_ptr()) as *const c_void },
        Err(_) => ptr::null(),
    }
}
