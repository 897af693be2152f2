// native_surface/src/adapter/mod.rs
//
//! Adapters from host lifecycle event streams to `SurfaceBinding` operations.
//!
//! The host delivers each event exactly once per transition, serialized on the controlling
//! thread. An adapter maps the event to `attach`, `redraw` or `detach`, logs the outcome, and
//! returns any rejection to the host, which decides whether to retry.

mod direct;
mod pacing;
mod stream;

pub use self::direct::DirectSurfaceAdapter;
pub use self::pacing::FramePacing;
pub use self::stream::{StreamIdentityPolicy, StreamOptions, StreamSurfaceAdapter};
