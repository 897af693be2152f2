// native_surface/src/platform/android/mod.rs
//
//! Bindings to EGL and OpenGL ES on Android.

pub mod context;
pub mod device;
pub mod surface;

mod error;
mod ffi;

pub use self::context::Context;
pub use self::device::Device;
pub use self::ffi::{ANativeWindow, ASurfaceTexture};
pub use self::surface::{NativeStream, NativeWidget, Surface};
