//! # Collection Backend Trait

use std::fmt::Debug;

use super::errors::StorageResult;

/// Where collection contents live between sessions
pub trait CollectionBackend: Debug {
    /// Reads the raw contents of `collection`; `None` when it does not exist
    fn read(&self, collection: &str) -> StorageResult<Option<String>>;

    /// Replaces the full contents of `collection`
    fn write(&self, collection: &str, contents: &str) -> StorageResult<()>;

    /// Human-readable location of `collection`, for logs
    fn location(&self, collection: &str) -> String;
}
