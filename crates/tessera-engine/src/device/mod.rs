//! Device context and capability reporting.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue (headless)
//! - owning the context's allocation register
//! - deciding which extensions the context reports, masquerade included

mod capabilities;
mod context;

pub use capabilities::{extension_features, probe_extensions, Capabilities};
pub use context::{backend_limits, Context, ContextInit};
