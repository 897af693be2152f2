// native_surface/src/platform/android/surface.rs
//
//! Window surfaces, and the native windows and texture streams they are created from.

use super::ffi::{ANativeWindow, ANativeWindow_acquire, ANativeWindow_fromSurface};
use super::ffi::{ANativeWindow_getHeight, ANativeWindow_getWidth, ANativeWindow_release};
use super::ffi::{ASurfaceTexture, ASurfaceTexture_fromSurfaceTexture, ASurfaceTexture_release};
use crate::egl::types::EGLSurface;
use crate::{StreamID, SurfaceID};

use euclid::default::Size2D;
use std::fmt::{self, Debug, Formatter};
use std::os::raw::c_void;
use std::thread;

/// An EGL window surface bound to a native window.
pub struct Surface {
    pub(crate) egl_surface: EGLSurface,
    pub(crate) native_widget: NativeWidget,
    pub(crate) destroyed: bool,
}

/// A native window. Owns one reference to the underlying `ANativeWindow`.
pub struct NativeWidget {
    pub(crate) native_window: *mut ANativeWindow,
}

/// The consumer side of a texture stream. Owns one reference to the underlying
/// `ASurfaceTexture`.
pub struct NativeStream {
    pub(crate) surface_texture: *mut ASurfaceTexture,
    pub(crate) id: StreamID,
}

impl Debug for Surface {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "Surface({:x})", self.id().0)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if !self.destroyed && !thread::panicking() {
            panic!("Should have destroyed the surface first with `destroy_surface()`!")
        }
    }
}

impl Surface {
    #[inline]
    pub fn id(&self) -> SurfaceID {
        SurfaceID(self.egl_surface as usize)
    }

    #[inline]
    pub fn native_widget(&self) -> &NativeWidget {
        &self.native_widget
    }
}

impl NativeWidget {
    /// Takes ownership of one reference to `native_window`, which is released on drop.
    #[inline]
    pub unsafe fn from_native_window(native_window: *mut ANativeWindow) -> NativeWidget {
        NativeWidget { native_window }
    }

    /// Acquires a new reference to `native_window`.
    pub unsafe fn from_borrowed_native_window(native_window: *mut ANativeWindow) -> NativeWidget {
        if !native_window.is_null() {
            ANativeWindow_acquire(native_window);
        }
        NativeWidget { native_window }
    }

    /// Wraps the `ANativeWindow` behind a Java `android.view.Surface`.
    ///
    /// `env` is the calling thread's `JNIEnv*` and `surface` a local reference to the surface.
    pub unsafe fn from_java_surface(env: *mut c_void, surface: *mut c_void) -> NativeWidget {
        NativeWidget { native_window: ANativeWindow_fromSurface(env, surface) }
    }

    /// Acquires the native window behind an Android NDK window handle.
    #[cfg(feature = "sm-raw-window-handle-06")]
    pub unsafe fn from_window_handle(handle: rwh_06::AndroidNdkWindowHandle) -> NativeWidget {
        NativeWidget::from_borrowed_native_window(handle.a_native_window.as_ptr() as *mut _)
    }

    /// The current size of the window's buffers, in device pixels.
    pub fn size(&self) -> Size2D<i32> {
        if self.native_window.is_null() {
            return Size2D::zero();
        }
        unsafe {
            Size2D::new(ANativeWindow_getWidth(self.native_window),
                        ANativeWindow_getHeight(self.native_window))
        }
    }
}

impl Drop for NativeWidget {
    fn drop(&mut self) {
        if !self.native_window.is_null() {
            unsafe { ANativeWindow_release(self.native_window) }
        }
    }
}

impl Debug for NativeWidget {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "NativeWidget({:?})", self.native_window)
    }
}

impl NativeStream {
    /// Takes ownership of one reference to `surface_texture`, which is released on drop.
    ///
    /// Hosts obtain a fresh `ASurfaceTexture` for the same Java object on every callback, so
    /// the pointer is not a stable identity. `id` must identify the Java `SurfaceTexture`
    /// itself, e.g. its identity hash code.
    #[inline]
    pub unsafe fn from_surface_texture(surface_texture: *mut ASurfaceTexture, id: StreamID)
                                       -> NativeStream {
        NativeStream { surface_texture, id }
    }

    /// Wraps a Java `android.graphics.SurfaceTexture`.
    pub unsafe fn from_java_surface_texture(env: *mut c_void,
                                            surface_texture: *mut c_void,
                                            id: StreamID)
                                            -> NativeStream {
        let surface_texture = ASurfaceTexture_fromSurfaceTexture(env, surface_texture);
        NativeStream { surface_texture, id }
    }

    #[inline]
    pub fn id(&self) -> StreamID {
        self.id
    }
}

impl Drop for NativeStream {
    fn drop(&mut self) {
        if !self.surface_texture.is_null() {
            unsafe { ASurfaceTexture_release(self.surface_texture) }
        }
    }
}

impl Debug for NativeStream {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "NativeStream({}, {:?})", self.id, self.surface_texture)
    }
}
