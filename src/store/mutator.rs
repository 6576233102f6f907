//! Reconciles a filtered working set with the full original set
//!
//! The original set is what gets persisted. The working set is the subset a
//! session's filters kept; its keys are always keys of the original.

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::keys::KeyGenerator;
use crate::query::{Record, RecordSet};

/// Save data after shape checks
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// One record: inserted as-is, or used as a field patch when filtered
    Record(Record),
    /// Several records inserted together
    Batch(Vec<Record>),
}

impl Payload {
    /// Classifies a JSON value as save data
    pub fn from_value(value: Value) -> StoreResult<Self> {
        match value {
            Value::Object(record) => Ok(Payload::Record(record)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(record) => Ok(record),
                    _ => Err(StoreError::InvalidPayload(format!(
                        "batch element {} is not a record",
                        i
                    ))),
                })
                .collect::<StoreResult<Vec<_>>>()
                .map(Payload::Batch),
            _ => Err(StoreError::InvalidPayload(
                "save data must be a record or a list of records".to_string(),
            )),
        }
    }
}

/// Applies mutations to an original set
pub struct Mutator;

impl Mutator {
    /// Shallow-merges `patch` into every working record, then copies the
    /// patched records over their originals. Returns the persisted key of
    /// each updated record.
    pub fn update(original: &mut RecordSet, working: &mut RecordSet, patch: &Record) -> Vec<String> {
        for record in working.values_mut() {
            for (field, value) in patch {
                record.insert(field.clone(), value.clone());
            }
        }

        let mut updated = Vec::with_capacity(working.len());
        for (key, record) in working.iter() {
            if let Some((index, _, slot)) = original.get_full_mut(key) {
                *slot = record.clone();
                updated.push(index.to_string());
            }
        }
        updated
    }

    /// Appends `records` to `original` under fresh keys.
    ///
    /// Collections are written as arrays and reloaded with positional keys,
    /// so the returned keys are the positions the records take in
    /// `original`, in insertion order.
    pub fn insert(
        original: &mut RecordSet,
        records: Vec<Record>,
        keys: &dyn KeyGenerator,
    ) -> Vec<String> {
        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            let mut key = keys.next_key();
            while original.contains_key(&key) {
                key = keys.next_key();
            }
            let (index, _) = original.insert_full(key, record);
            inserted.push(index.to_string());
        }
        inserted
    }

    /// Drops every key of `working` from `original`, returning the removed
    /// session keys
    pub fn remove(original: &mut RecordSet, working: &RecordSet) -> Vec<String> {
        let removed: Vec<String> = working
            .keys()
            .filter(|k| original.contains_key(*k))
            .cloned()
            .collect();
        original.retain(|key, _| !working.contains_key(key));
        removed
    }
}
