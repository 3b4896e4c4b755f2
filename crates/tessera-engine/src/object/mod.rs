//! Lifecycle contract shared by all GPU-backed objects.

mod error;
mod lifecycle;

pub use error::LifecycleError;
pub use lifecycle::{Object, Resource};
