// native_surface/src/platform/recording/mod.rs
//
//! A device that renders nothing and records every native call it receives.
//!
//! This backend never touches the GPU. It is what the test suite runs against, and it can be
//! used by hosts to replay an event stream and inspect the resulting sequence of native calls.

mod device;

pub use self::device::{CallLog, Context, Device, FailurePoint, NativeCall};
pub use self::device::{NativeStream, NativeWidget, Surface};
