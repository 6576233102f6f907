//! Storage error types
//!
//! Error codes:
//! - QUILL_STORAGE_READ_FAILED
//! - QUILL_STORAGE_WRITE_FAILED
//! - QUILL_STORAGE_MALFORMED
//! - QUILL_STORAGE_ENCODE_FAILED

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Collection storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing resource exists but could not be read
    #[error("Failed to read collection '{collection}': {source}")]
    ReadFailed {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// Backing resource could not be written
    #[error("Failed to write collection '{collection}': {source}")]
    WriteFailed {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// Backing resource is not a JSON array of records
    #[error("Malformed collection '{collection}': {reason}")]
    Malformed { collection: String, reason: String },

    /// Records could not be serialized for writing
    #[error("Failed to encode collection '{collection}': {reason}")]
    EncodeFailed { collection: String, reason: String },
}

impl StorageError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::ReadFailed { .. } => "QUILL_STORAGE_READ_FAILED",
            StorageError::WriteFailed { .. } => "QUILL_STORAGE_WRITE_FAILED",
            StorageError::Malformed { .. } => "QUILL_STORAGE_MALFORMED",
            StorageError::EncodeFailed { .. } => "QUILL_STORAGE_ENCODE_FAILED",
        }
    }

    /// Collection the error concerns
    pub fn collection(&self) -> &str {
        match self {
            StorageError::ReadFailed { collection, .. }
            | StorageError::WriteFailed { collection, .. }
            | StorageError::Malformed { collection, .. }
            | StorageError::EncodeFailed { collection, .. } => collection,
        }
    }

    pub(crate) fn malformed(collection: &str, reason: impl Into<String>) -> Self {
        StorageError::Malformed {
            collection: collection.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn encode_failed(collection: &str, reason: impl Into<String>) -> Self {
        StorageError::EncodeFailed {
            collection: collection.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_codes() {
        let err = StorageError::WriteFailed {
            collection: "contacts".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.code(), "QUILL_STORAGE_WRITE_FAILED");
        assert_eq!(err.collection(), "contacts");

        let err = StorageError::malformed("contacts", "expected array");
        assert_eq!(err.code(), "QUILL_STORAGE_MALFORMED");
    }

    #[test]
    fn test_display_names_collection() {
        let err = StorageError::malformed("contacts", "trailing comma");
        let display = err.to_string();
        assert!(display.contains("contacts"));
        assert!(display.contains("trailing comma"));
    }
}
