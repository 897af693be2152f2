// native_surface/src/platform/mod.rs
//
//! Platform-specific backends.

pub mod recording;

#[cfg(android)]
pub mod android;
#[cfg(android)]
pub use self::android as default;
