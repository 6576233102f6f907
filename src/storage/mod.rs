//! Storage subsystem for quilldb
//!
//! A collection is one JSON document holding an array of records. This
//! module only moves whole collection snapshots in and out; it knows nothing
//! about filters or sessions.
//!
//! # Guarantees
//!
//! - A missing collection reads as empty, not as an error
//! - Malformed contents fail loudly and distinctly from "missing"
//! - Write failures are always returned to the caller
//! - Unless write locking is enabled, concurrent writers race and the last
//!   one wins

mod backend;
pub mod codec;
mod errors;
mod local;

pub use backend::CollectionBackend;
pub use errors::{StorageError, StorageResult};
pub use local::{LocalBackend, WriteMode, COLLECTION_EXTENSION};
