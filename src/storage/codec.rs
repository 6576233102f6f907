//! Collection file encoding
//!
//! On disk a collection is a pretty-printed JSON array of records with
//! non-ASCII text left unescaped. On load each record gets its array
//! position as key. A top-level object is also accepted; its keys are kept.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use super::errors::{StorageError, StorageResult};
use crate::query::RecordSet;

const INDENT: &[u8] = b"    ";

/// Decodes raw collection text into a keyed record set
pub fn decode(collection: &str, text: &str) -> StorageResult<RecordSet> {
    if text.trim().is_empty() {
        return Ok(RecordSet::new());
    }

    let root: Value = serde_json::from_str(text)
        .map_err(|e| StorageError::malformed(collection, format!("Invalid JSON: {}", e)))?;

    let entries: Vec<(String, Value)> = match root {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Object(map) => map.into_iter().collect(),
        other => {
            return Err(StorageError::malformed(
                collection,
                format!("expected an array of records, found {}", kind_of(&other)),
            ))
        }
    };

    let mut records = RecordSet::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            Value::Object(record) => {
                records.insert(key, record);
            }
            other => {
                return Err(StorageError::malformed(
                    collection,
                    format!("entry '{}' is {}, not a record", key, kind_of(&other)),
                ))
            }
        }
    }
    Ok(records)
}

/// Encodes records as a pretty-printed JSON array, in set order
pub fn encode(collection: &str, records: &RecordSet) -> StorageResult<String> {
    let rows: Vec<_> = records.values().collect();

    let mut buf = Vec::with_capacity(64 * (rows.len() + 1));
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    rows.serialize(&mut ser)
        .map_err(|e| StorageError::encode_failed(collection, e.to_string()))?;

    String::from_utf8(buf).map_err(|e| StorageError::encode_failed(collection, e.to_string()))
}

/// Contents of an empty collection
pub fn empty() -> &'static str {
    "[]"
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
