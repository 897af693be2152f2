// native_surface/src/platform/android/ffi.rs

use std::os::raw::c_void;

#[repr(C)]
pub struct ANativeWindow {
    opaque: i32,
}

#[repr(C)]
pub struct ASurfaceTexture {
    opaque: i32,
}

#[link(name = "android")]
extern "C" {
    pub(crate) fn ANativeWindow_fromSurface(env: *mut c_void, surface: *mut c_void)
                                            -> *mut ANativeWindow;
    pub(crate) fn ANativeWindow_acquire(window: *mut ANativeWindow);
    pub(crate) fn ANativeWindow_release(window: *mut ANativeWindow);
    pub(crate) fn ANativeWindow_getWidth(window: *mut ANativeWindow) -> i32;
    pub(crate) fn ANativeWindow_getHeight(window: *mut ANativeWindow) -> i32;

    pub(crate) fn ASurfaceTexture_fromSurfaceTexture(env: *mut c_void, surface_texture: *mut c_void)
                                                     -> *mut ASurfaceTexture;
    pub(crate) fn ASurfaceTexture_acquireANativeWindow(surface_texture: *mut ASurfaceTexture)
                                                       -> *mut ANativeWindow;
    pub(crate) fn ASurfaceTexture_release(surface_texture: *mut ASurfaceTexture);
}
