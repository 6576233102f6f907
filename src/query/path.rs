//! Dotted-path traversal over records
//!
//! A path like `address.city` descends one segment at a time. Any missing
//! segment or null value along the way makes the whole lookup absent.

use serde_json::{Map, Value};

use crate::query::Record;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Resolves `path` against `record`.
///
/// Array values accept a decimal index segment (`tags.0`).
pub fn resolve<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(PATH_SEPARATOR);
    let first = segments.next()?;
    let mut current = record.get(first)?;

    for segment in segments {
        current = step(current, segment)?;
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    let next = match value {
        Value::Object(map) => map.get(segment)?,
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
        _ => return None,
    };

    if next.is_null() {
        None
    } else {
        Some(next)
    }
}

/// Writes `value` into `target` at `path`, creating intermediate objects.
///
/// An intermediate that exists but is not an object is replaced. The value
/// is moved in; nothing is shared with the record it was resolved from.
pub fn insert_at_path(target: &mut Record, path: &str, value: Value) {
    match path.split_once(PATH_SEPARATOR) {
        None => {
            target.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let slot = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(child) = slot {
                insert_at_path(child, rest, value);
            }
        }
    }
}

/// Truthiness used by projection: null, false, zero, `""`, `"0"` and
/// empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
