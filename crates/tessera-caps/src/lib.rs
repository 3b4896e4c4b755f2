//! Backend kinds, the extension catalog, and the **extensions hash**: a short,
//! versioned string that records which optional capabilities a context
//! supports (or should pretend to support).
//!
//! This crate has no GPU dependencies so hashes can be produced and inspected
//! by tooling that never opens a device.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`backend`] | `Backend` |
//! | [`extension`] | `Extension`, versioned catalogs, per-backend lists |
//! | [`base64`] | six-bit symbol alphabet |
//! | [`hash`] | `encode`, `decode`, `complement` |
//! | [`error`] | `HashError`, `ErrorKind` |
//!
//! # Quick start
//!
//! ```rust
//! use tessera_caps::{hash, Backend, Extension};
//!
//! let h = hash::encode(Backend::WebGl2, &[Extension::ExtColorBufferFloat]);
//! let (backend, exts) = hash::decode(&h).unwrap();
//! assert_eq!(backend, Backend::WebGl2);
//! assert_eq!(exts, vec![Extension::ExtColorBufferFloat]);
//! ```

pub mod backend;
pub mod base64;
pub mod error;
pub mod extension;
pub mod hash;

pub use backend::Backend;
pub use error::{ErrorKind, HashError};
pub use extension::{Extension, LATEST_VERSION};
