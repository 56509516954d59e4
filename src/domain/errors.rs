use thiserror::Error;

/// Errors surfaced by the persistence layer. Handlers pattern-match on
/// these and map each case to a documented response (redirect or error
/// render) rather than catching blindly.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("unexpected repository error: {0}")]
    Unexpected(String),
}

impl RepositoryError {
    pub fn conflict(message: impl Into<String>) -> Self {
        RepositoryError::Conflict(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        RepositoryError::Unexpected(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

/// Errors from the cover image store. Deletion is best-effort and never
/// returns one of these; storing and reading do.
#[derive(Debug, Error)]
pub enum CoverStoreError {
    #[error("cover file not found")]
    NotFound,

    #[error("invalid cover file name")]
    InvalidFileName,

    #[error("cover store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
