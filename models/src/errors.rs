// models/src/errors.rs

pub use thiserror::Error;

/// Coarse classification used by the API layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Conflict,
    Server,
}

#[derive(Debug, Error)]
pub enum HostelError {
    #[error("{0}")]
    Validation(String), // Missing or malformed field
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String), // Uniqueness violation or a forbidden state transition
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Authorization(String),

    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("An internal error occurred: {0}")]
    InternalError(String),

    #[cfg(feature = "sled-errors")]
    #[error(transparent)]
    Sled(#[from] sled::Error),
}

impl HostelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        HostelError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        HostelError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        HostelError::Conflict(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HostelError::Validation(_) => ErrorKind::Validation,
            HostelError::NotFound(_) => ErrorKind::NotFound,
            HostelError::Conflict(_) => ErrorKind::Conflict,
            HostelError::Authentication(_) => ErrorKind::Authentication,
            HostelError::Authorization(_) => ErrorKind::Authorization,
            _ => ErrorKind::Server,
        }
    }
}

impl From<serde_json::Error> for HostelError {
    fn from(err: serde_json::Error) -> Self {
        HostelError::SerializationError(format!("JSON processing error: {}", err))
    }
}

pub type HostelResult<T> = Result<T, HostelError>;
