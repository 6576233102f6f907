//! quilldb - a file-backed JSON record store
//!
//! Collections are JSON arrays of records kept in `<name>.json` files. A
//! session loads one collection, narrows it with chained filters, and either
//! reads it (optionally projected to selected fields) or finishes with one
//! mutation that is written straight back.

pub mod cli;
pub mod config;
pub mod observability;
pub mod query;
pub mod storage;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use query::{Filter, Operator, Record, RecordSet, Selection};
pub use storage::{CollectionBackend, LocalBackend, StorageError, WriteMode};
pub use store::{Session, Store, StoreError, StoreResult, WriteResult};
