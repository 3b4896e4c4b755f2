//! GPU memory accounting.
//!
//! Every GPU-backed object reports the size of its backing store to the
//! [`AllocationRegister`] of its context under a register-assigned identifier.

mod bytes;
mod error;
mod observable;
mod register;

pub use bytes::pretty_bytes;
pub use error::AllocationError;
pub use observable::{Observable, SubscriptionId};
pub use register::{AllocationChange, AllocationRegister, SharedRegister};
