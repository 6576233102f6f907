//! Query engine for quilldb
//!
//! Pure functions over in-memory records: dotted-path resolution, value
//! comparison, predicate filtering and field projection. Nothing here touches
//! storage.

pub mod comparator;
pub mod filter;
pub mod path;
pub mod projection;

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub use comparator::{compare, Operator};
pub use filter::{matches_all, Filter};
pub use path::{insert_at_path, is_truthy, resolve};
pub use projection::{project, Selection, WILDCARD};

/// One stored entry: field name to value
pub type Record = Map<String, Value>;

/// Records by key, in collection order
pub type RecordSet = IndexMap<String, Record>;
