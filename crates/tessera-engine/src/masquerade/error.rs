use tessera_caps::{ErrorKind, HashError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MasqueradeError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("unknown masquerade preset {0:?}")]
    UnknownPreset(String),

    #[error("failed to parse masquerade presets: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MasqueradeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MasqueradeError::Hash(e) => e.kind(),
            MasqueradeError::UnknownPreset(_) => ErrorKind::InvariantViolation,
            MasqueradeError::Parse(_) => ErrorKind::FormatError,
        }
    }
}
