use thiserror::Error;

/// Broad category of a failure.
///
/// All failures in this workspace are programming errors; the category only
/// separates malformed external encodings from other broken preconditions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A precondition on an internal-consistency-bearing call failed.
    InvariantViolation,
    /// An external encoding (hash string) is malformed.
    FormatError,
}

/// An error from encoding or decoding an extensions hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("bitfield {0} is outside of the 6-bit range [0, 63]")]
    BitfieldOutOfRange(u8),

    #[error("hash is empty")]
    Empty,

    #[error("character {0:?} is not part of the hash alphabet")]
    UnknownCharacter(char),

    #[error("unknown backend {0:?}")]
    UnknownBackend(String),

    #[error("unknown extension {0:?}")]
    UnknownExtension(String),

    /// Carries the raw 3-bit backend field of the header (one-based).
    #[error("backend field {0} in hash header is out of range")]
    BackendIndexOutOfRange(u8),

    #[error("no extension catalog for version {0}")]
    UnknownVersion(u8),

    #[error("hash has length {actual}, expected {expected} for version {version}")]
    WrongLength {
        version: u8,
        expected: usize,
        actual: usize,
    },
}

impl HashError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HashError::Empty
            | HashError::UnknownCharacter(_)
            | HashError::WrongLength { .. } => ErrorKind::FormatError,
            _ => ErrorKind::InvariantViolation,
        }
    }
}

pub type Result<T> = std::result::Result<T, HashError>;
