use tessera_caps::ErrorKind;
use thiserror::Error;

/// A broken precondition on an [`AllocationRegister`](super::AllocationRegister) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("unknown allocation identifier {0:?}")]
    UnknownIdentifier(String),

    #[error("deallocating {amount} bytes exceeds the {tracked} bytes tracked for {identifier:?}")]
    DeallocationExceedsTracked {
        identifier: String,
        amount: u64,
        tracked: u64,
    },

    #[error("allocating {amount} bytes for {identifier:?} overflows the register total")]
    Overflow { identifier: String, amount: u64 },
}

impl AllocationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvariantViolation
    }
}
