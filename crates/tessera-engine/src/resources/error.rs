use tessera_caps::ErrorKind;
use thiserror::Error;

use crate::object::LifecycleError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("{0:?} has no backing handle")]
    Invalid(String),

    #[error("{identifier:?} expects {expected} bytes of data, got {actual}")]
    DataSize {
        identifier: String,
        expected: u64,
        actual: u64,
    },
}

impl ResourceError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvariantViolation
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;
