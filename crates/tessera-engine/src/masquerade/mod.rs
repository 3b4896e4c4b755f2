//! Capability masquerading: make a fully capable device report a reduced
//! extension set, for exercising fallback paths.
//!
//! A masquerade is built from an extensions hash, from a named [`Preset`], or
//! from the environment ([`MasqueradeConfig::from_env`]).

mod config;
mod error;
mod mask;
mod preset;

pub use config::{MasqueradeConfig, HASH_VAR, PRESET_VAR};
pub use error::MasqueradeError;
pub use mask::Masquerade;
pub use preset::Preset;
