//! Per-query session over one collection
//!
//! A session is created by loading a collection, narrowed by any number of
//! filters, read any number of times, and finished by at most one mutation.
//! Mutations consume the session, so the next query always starts from a
//! fresh load.

use serde::Serialize;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::mutator::{Mutator, Payload};
use super::store::Store;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::query::{project, Filter, Operator, Record, RecordSet, Selection};
use crate::storage::codec;

/// Keys touched by a terminal mutation
///
/// Inserted and updated records are reported under the key they load with
/// after the write, so `store.from(name)?.get(key)` finds them. Removed
/// records are reported under their key in the deleting session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    /// Inserted, updated or removed keys, in collection order
    pub keys: Vec<String>,
}

impl WriteResult {
    fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Number of records touched
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no record was touched
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A loaded collection plus the filters and selection applied so far
#[derive(Debug)]
pub struct Session<'s> {
    store: &'s Store,
    collection: String,
    working: RecordSet,
    original: RecordSet,
    selection: Selection,
    filtered: bool,
}

impl<'s> Session<'s> {
    pub(crate) fn new(store: &'s Store, collection: &str, records: RecordSet) -> Self {
        Self {
            store,
            collection: collection.to_string(),
            working: records.clone(),
            original: records,
            selection: Selection::all(),
            filtered: false,
        }
    }

    /// Name of the loaded collection
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns true once any filter has been applied
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Number of records in the working set
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Returns true if the working set is empty
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ---------------------------------------------------------------------
    // Filters
    // ---------------------------------------------------------------------

    /// Narrows the working set to records matching `filter`
    pub fn filter(mut self, filter: Filter) -> Self {
        if let Some(op) = filter.operator().filter(|op| !op.is_supported()) {
            log_event_with_fields(
                Event::UnsupportedOperator,
                &[
                    ("collection", self.collection.as_str()),
                    ("field", filter.field()),
                    ("op", op.as_str()),
                ],
            );
        }

        let before = self.working.len();
        self.working.retain(|_, record| filter.matches(record));
        self.filtered = true;

        if Logger::enabled(Severity::Trace) {
            log_event_with_fields(
                Event::FilterApplied,
                &[
                    ("after", self.working.len().to_string().as_str()),
                    ("before", before.to_string().as_str()),
                    ("collection", self.collection.as_str()),
                    ("field", filter.field()),
                ],
            );
        }
        self
    }

    /// Keeps records where `field` resolves to a non-null value
    pub fn present(self, field: &str) -> Self {
        self.filter(Filter::present(field))
    }

    /// Keeps records where `field` equals `value`
    pub fn equals(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(Filter::equals(field, value))
    }

    /// Keeps records where `field <op> value` holds
    pub fn compare(self, field: &str, op: impl Into<Operator>, value: impl Into<Value>) -> Self {
        self.filter(Filter::compare(field, op, value))
    }

    /// Keeps records that have the top-level key `field`
    pub fn exists(self, field: &str) -> Self {
        self.filter(Filter::exists(field, true))
    }

    /// Keeps records that lack the top-level key `field`
    pub fn not_exists(self, field: &str) -> Self {
        self.filter(Filter::exists(field, false))
    }

    /// Keeps records whose list `field` holds `value`
    pub fn contains(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(Filter::contains(field, value, true))
    }

    /// Keeps records whose list `field` does not hold `value`
    pub fn not_contains(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(Filter::contains(field, value, false))
    }

    /// Keeps records whose list at `field` has a length satisfying `op value`
    pub fn count(self, field: &str, op: impl Into<Operator>, value: impl Into<Value>) -> Self {
        self.filter(Filter::count(field, op, value))
    }

    /// Keeps records whose list at `field` has exactly `len` items.
    ///
    /// For a length held as text use [`count`](Self::count): numeric string
    /// operands are coerced, so `count(field, "=", "2")` matches two items.
    pub fn count_equals(self, field: &str, len: usize) -> Self {
        self.filter(Filter::count(field, Operator::Eq, len))
    }

    /// Keeps records where `field` resolves to a list
    pub fn is_list(self, field: &str) -> Self {
        self.filter(Filter::is_list(field))
    }

    /// Restricts `rows` to the given dotted paths; `"*"` or none means all
    pub fn select<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = Selection::new(paths);
        self
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// Working set projected through the selection; repeatable
    pub fn rows(&self) -> RecordSet {
        project(&self.working, &self.selection)
    }

    /// Record in the working set under `key`
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.working.get(key)
    }

    // ---------------------------------------------------------------------
    // Terminal mutations
    // ---------------------------------------------------------------------

    /// Inserts or updates.
    ///
    /// Unfiltered, a record or a list of records is appended under fresh
    /// keys. Filtered, `data` must be a record whose top-level fields
    /// overwrite those of every matched record.
    pub fn save(self, data: Value) -> StoreResult<WriteResult> {
        let payload = Payload::from_value(data)?;
        self.apply_save(payload)
    }

    /// [`save`](Self::save) for any serializable type that maps to a record
    pub fn save_entity<T: Serialize>(self, entity: &T) -> StoreResult<WriteResult> {
        match serde_json::to_value(entity)? {
            Value::Object(record) => self.apply_save(Payload::Record(record)),
            _ => Err(StoreError::InvalidPayload(
                "entity does not serialize to a record".to_string(),
            )),
        }
    }

    fn apply_save(mut self, payload: Payload) -> StoreResult<WriteResult> {
        let (keys, event) = if self.filtered {
            let patch = match payload {
                Payload::Record(patch) => patch,
                Payload::Batch(_) => {
                    return Err(StoreError::InvalidPayload(
                        "a filtered save takes one record of fields to set".to_string(),
                    ))
                }
            };
            let keys = Mutator::update(&mut self.original, &mut self.working, &patch);
            (keys, Event::RecordsUpdated)
        } else {
            let records = match payload {
                Payload::Record(record) => vec![record],
                Payload::Batch(records) => records,
            };
            let keys = Mutator::insert(&mut self.original, records, self.store.keys());
            (keys, Event::RecordsInserted)
        };

        log_event_with_fields(
            event,
            &[
                ("collection", self.collection.as_str()),
                ("count", keys.len().to_string().as_str()),
            ],
        );

        self.persist()?;
        Ok(WriteResult::new(keys))
    }

    /// Removes every record the filters matched.
    ///
    /// Without a filter nothing is removed, but the collection is still
    /// rewritten.
    pub fn delete(mut self) -> StoreResult<WriteResult> {
        let keys = if self.filtered {
            Mutator::remove(&mut self.original, &self.working)
        } else {
            Vec::new()
        };

        log_event_with_fields(
            Event::RecordsRemoved,
            &[
                ("collection", self.collection.as_str()),
                ("count", keys.len().to_string().as_str()),
                ("filtered", if self.filtered { "true" } else { "false" }),
            ],
        );

        self.persist()?;
        Ok(WriteResult::new(keys))
    }

    /// Empties the collection regardless of filters
    pub fn truncate(self) -> StoreResult<WriteResult> {
        self.store.truncate(&self.collection)
    }

    fn persist(&self) -> StoreResult<()> {
        let contents = codec::encode(&self.collection, &self.original)?;
        self.store.write(&self.collection, &contents, self.original.len())
    }
}
