//! Store and session lifecycle
//!
//! ```ignore
//! use quilldb::Store;
//! use serde_json::json;
//!
//! let store = Store::local("./data");
//!
//! // read
//! let rows = store.from("contacts")?.equals("name", "Ann").select(["tags"]).rows();
//!
//! // update
//! store.from("contacts")?.contains("tags", "x").save(json!({"active": true}))?;
//! ```
//!
//! # Lifecycle
//!
//! `Store::from` → filters/select (consume and return the session) →
//! `rows`/`get` (borrow, repeatable) → at most one of `save`, `delete`,
//! `truncate` (consume). State never outlives the terminal call.

mod errors;
mod keys;
mod mutator;
mod session;
mod store;

pub use errors::{StoreError, StoreResult};
pub use keys::{KeyGenerator, UuidKeyGenerator};
pub use mutator::{Mutator, Payload};
pub use session::{Session, WriteResult};
pub use store::Store;
