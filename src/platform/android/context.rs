// native_surface/src/platform/android/context.rs
//
//! Wrapper for EGL contexts on Android.

use super::device::{Device, Library, EGL_FUNCTIONS};
use super::error::ToWindowingApiError;
use crate::egl;
use crate::egl::types::{EGLConfig, EGLContext, EGLDisplay, EGLSurface, EGLint};
use crate::{ContextAttributeFlags, ContextAttributes, Error};

use libc::{dlopen, dlsym, RTLD_LAZY};
use std::ffi::CString;
use std::fmt::{self, Debug, Formatter};
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::OnceLock;

const DUMMY_PBUFFER_SIZE: EGLint = 16;
const RGB_CHANNEL_BIT_DEPTH: EGLint = 8;

/// The shared EGL context.
///
/// A small pbuffer is kept alongside it so that the context can be made current while no
/// window surface is bound.
pub struct Context {
    pub(crate) egl_context: EGLContext,
    pub(crate) egl_config: EGLConfig,
    pub(crate) pbuffer: EGLSurface,
    pub(crate) gl: glow::Context,
}

impl Debug for Context {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "Context({:?})", self.egl_context)
    }
}

static GLES_LIBRARY: OnceLock<Library> = OnceLock::new();

impl Device {
    pub(crate) fn create_egl_context(&self, attributes: &ContextAttributes)
                                     -> Result<Context, Error> {
        unsafe {
            let egl_config = choose_config(self.egl_display, attributes)?;
            let egl_context = create_context(self.egl_display, egl_config, attributes)?;

            let pbuffer = match create_pbuffer(self.egl_display, egl_config) {
                Ok(pbuffer) => pbuffer,
                Err(err) => {
                    EGL_FUNCTIONS.with(|egl| egl.DestroyContext(self.egl_display, egl_context));
                    return Err(err);
                }
            };

            // GL entry points only resolve correctly once a context is current.
            if let Err(err) = make_current(self.egl_display, pbuffer, egl_context) {
                EGL_FUNCTIONS.with(|egl| {
                    egl.DestroySurface(self.egl_display, pbuffer);
                    egl.DestroyContext(self.egl_display, egl_context);
                });
                return Err(err);
            }

            let gl = glow::Context::from_loader_function(get_gl_proc_address);
            Ok(Context { egl_context, egl_config, pbuffer, gl })
        }
    }

    pub(crate) fn destroy_egl_context(&self, context: &mut Context) -> Result<(), Error> {
        if context.egl_context == egl::NO_CONTEXT {
            return Ok(());
        }

        EGL_FUNCTIONS.with(|egl| unsafe {
            egl.MakeCurrent(self.egl_display, egl::NO_SURFACE, egl::NO_SURFACE, egl::NO_CONTEXT);

            if context.pbuffer != egl::NO_SURFACE {
                egl.DestroySurface(self.egl_display, context.pbuffer);
                context.pbuffer = egl::NO_SURFACE;
            }

            let result = egl.DestroyContext(self.egl_display, context.egl_context);
            context.egl_context = egl::NO_CONTEXT;
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::ContextDestructionFailed(err));
            }
            Ok(())
        })
    }

    pub(crate) fn make_pbuffer_current(&self, context: &Context) -> Result<(), Error> {
        unsafe { make_current(self.egl_display, context.pbuffer, context.egl_context) }
    }
}

pub(crate) unsafe fn make_current(egl_display: EGLDisplay,
                                  egl_surface: EGLSurface,
                                  egl_context: EGLContext)
                                  -> Result<(), Error> {
    EGL_FUNCTIONS.with(|egl| {
        let result = egl.MakeCurrent(egl_display, egl_surface, egl_surface, egl_context);
        if result == egl::FALSE {
            let err = egl.GetError().to_windowing_api_error();
            return Err(Error::MakeCurrentFailed(err));
        }
        Ok(())
    })
}

unsafe fn choose_config(egl_display: EGLDisplay, attributes: &ContextAttributes)
                        -> Result<EGLConfig, Error> {
    if !(2..=3).contains(&attributes.version.major) {
        return Err(Error::UnsupportedGLVersion);
    }

    let flags = attributes.flags;
    let alpha_size   = if flags.contains(ContextAttributeFlags::ALPHA)   { 8  } else { 0 };
    let depth_size   = if flags.contains(ContextAttributeFlags::DEPTH)   { 24 } else { 0 };
    let stencil_size = if flags.contains(ContextAttributeFlags::STENCIL) { 8  } else { 0 };

    let renderable_type = if attributes.version.major >= 3 {
        egl::OPENGL_ES3_BIT
    } else {
        egl::OPENGL_ES2_BIT
    };

    let config_attributes = [
        egl::RED_SIZE as EGLint,        RGB_CHANNEL_BIT_DEPTH,
        egl::GREEN_SIZE as EGLint,      RGB_CHANNEL_BIT_DEPTH,
        egl::BLUE_SIZE as EGLint,       RGB_CHANNEL_BIT_DEPTH,
        egl::ALPHA_SIZE as EGLint,      alpha_size,
        egl::DEPTH_SIZE as EGLint,      depth_size,
        egl::STENCIL_SIZE as EGLint,    stencil_size,
        egl::SURFACE_TYPE as EGLint,    (egl::WINDOW_BIT | egl::PBUFFER_BIT) as EGLint,
        egl::RENDERABLE_TYPE as EGLint, renderable_type as EGLint,
        egl::NONE as EGLint,            0,
        0,                              0,
    ];

    EGL_FUNCTIONS.with(|egl| {
        let (mut egl_config, mut config_count) = (ptr::null(), 0);
        let result = egl.ChooseConfig(egl_display,
                                      config_attributes.as_ptr(),
                                      &mut egl_config,
                                      1,
                                      &mut config_count);
        if result == egl::FALSE {
            let err = egl.GetError().to_windowing_api_error();
            return Err(Error::PixelFormatSelectionFailed(err));
        }
        if config_count == 0 || egl_config.is_null() {
            return Err(Error::NoPixelFormatFound);
        }
        Ok(egl_config)
    })
}

unsafe fn create_context(egl_display: EGLDisplay,
                         egl_config: EGLConfig,
                         attributes: &ContextAttributes)
                         -> Result<EGLContext, Error> {
    // Include some extra zeroes to work around broken implementations.
    let egl_context_attributes = [
        egl::CONTEXT_CLIENT_VERSION as EGLint, attributes.version.major as EGLint,
        egl::NONE as EGLint, 0,
        0, 0,
    ];

    EGL_FUNCTIONS.with(|egl| {
        let egl_context = egl.CreateContext(egl_display,
                                            egl_config,
                                            egl::NO_CONTEXT,
                                            egl_context_attributes.as_ptr());
        if egl_context == egl::NO_CONTEXT {
            let err = egl.GetError().to_windowing_api_error();
            return Err(Error::ContextCreationFailed(err));
        }
        Ok(egl_context)
    })
}

unsafe fn create_pbuffer(egl_display: EGLDisplay, egl_config: EGLConfig)
                         -> Result<EGLSurface, Error> {
    let pbuffer_attributes = [
        egl::WIDTH as EGLint,   DUMMY_PBUFFER_SIZE,
        egl::HEIGHT as EGLint,  DUMMY_PBUFFER_SIZE,
        egl::NONE as EGLint,    0,
        0,                      0,
    ];

    EGL_FUNCTIONS.with(|egl| {
        let pbuffer = egl.CreatePbufferSurface(egl_display,
                                               egl_config,
                                               pbuffer_attributes.as_ptr());
        if pbuffer == egl::NO_SURFACE {
            let err = egl.GetError().to_windowing_api_error();
            return Err(Error::ContextCreationFailed(err));
        }
        Ok(pbuffer)
    })
}

fn get_gl_proc_address(symbol_name: &str) -> *const c_void {
    let symbol_name = match CString::new(symbol_name) {
        Ok(symbol_name) => symbol_name,
        Err(_) => return ptr::null(),
    };

    let library = GLES_LIBRARY.get_or_init(|| unsafe {
        Library(dlopen(b"libGLESv2.so\0".as_ptr() as *const c_char, RTLD_LAZY))
    });

    unsafe {
        if !library.0.is_null() {
            let symbol = dlsym(library.0, symbol_name.as_ptr());
            if !symbol.is_null() {
                return symbol as *const c_void;
            }
        }
        EGL_FUNCTIONS.with(|egl| egl.GetProcAddress(symbol_name.as_ptr()) as *const c_void)
    }
}
