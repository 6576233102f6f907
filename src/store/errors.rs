//! Store error types

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by sessions and the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, decoding or writing the collection failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Save data has a shape the current session cannot apply
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A typed entity could not be turned into a record
    #[error("Failed to serialize entity: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Storage(e) => e.code(),
            StoreError::InvalidPayload(_) => "QUILL_INVALID_PAYLOAD",
            StoreError::Serialization(_) => "QUILL_SERIALIZATION_FAILED",
        }
    }

    /// Returns true for malformed collection contents
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::Storage(StorageError::Malformed { .. }))
    }

    /// Returns true if the backend rejected a write
    pub fn is_write_failure(&self) -> bool {
        matches!(self, StoreError::Storage(StorageError::WriteFailed { .. }))
    }
}
