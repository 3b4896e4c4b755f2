//! Tessera engine crate.
//!
//! GPU-backed objects on top of wgpu, with per-context memory accounting and
//! capability masquerading.

pub mod alloc;
pub mod device;
pub mod logging;
pub mod masquerade;
pub mod object;
pub mod resources;

pub use tessera_caps as caps;
