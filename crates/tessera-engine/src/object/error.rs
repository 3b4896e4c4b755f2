use tessera_caps::ErrorKind;
use thiserror::Error;

use crate::alloc::AllocationError;

/// A violation of the initialize/uninitialize contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("{0:?} is already initialized; re-initialization is not permitted")]
    AlreadyInitialized(String),

    #[error("{0:?} is not initialized")]
    NotInitialized(String),

    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

impl LifecycleError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvariantViolation
    }
}
