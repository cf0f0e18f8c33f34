//! Error types shared by the record stores.

use crate::backend::RemoteError;

/// Failure kinds surfaced by the record stores.
///
/// Callers can tell a missing record apart from a storage medium that
/// refused a write or a remote backend that returned an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Remote failure: {0}")]
    RemoteFailure(#[from] RemoteError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::StorageFailure(e.to_string())
    }
}

/// Result alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;
