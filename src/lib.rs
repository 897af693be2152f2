// native_surface/src/lib.rs
//
//! Binding host-provided drawable surfaces to a shared native rendering context.
//!
//! Host UI toolkits hand out drawable targets asynchronously: a surface becomes available,
//! changes size, and is eventually destroyed. This crate owns a single shared
//! `RenderingContext` and mediates those transitions, one target at a time, through a
//! `SurfaceBinding` state machine. Two adapters translate host event streams into binding
//! operations: `DirectSurfaceAdapter` for directly presentable surfaces and
//! `StreamSurfaceAdapter` for producer/consumer texture streams.
//!
//! The actual GPU work sits behind the `Device` trait. `platform::android` implements it with
//! EGL; `platform::recording` implements it without touching the GPU and records every native
//! call, which is useful for tests and for dry-running a host's event stream.

pub mod platform;

pub mod error;
pub use crate::error::{Error, WindowingApiError};

pub mod device;
pub use crate::device::Device;

mod context;
pub use crate::context::{ContextAttributeFlags, ContextAttributes, ContextID, RenderingContext};

mod info;
pub use crate::info::{GLApi, GLVersion};

mod surface;
pub use crate::surface::{BindingState, StreamID, SurfaceID, SurfaceInfo, SurfaceTarget};

mod binding;
pub use crate::binding::SurfaceBinding;

pub mod adapter;
pub use crate::adapter::{DirectSurfaceAdapter, StreamSurfaceAdapter};

#[cfg(android)]
#[allow(non_camel_case_types)]
#[allow(dead_code)]
mod egl {
    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}

#[cfg(test)]
mod tests;
