//! Field projection
//!
//! Restricts each record to a chosen set of dotted paths.

use super::path::{insert_at_path, is_truthy, resolve};
use super::{Record, RecordSet};

/// Path that clears any selection
pub const WILDCARD: &str = "*";

/// Ordered list of dotted paths to keep; empty means full records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: Vec<String>,
}

impl Selection {
    /// Builds a selection; any wildcard makes it unrestricted
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        if paths.iter().any(|p| p == WILDCARD) {
            return Self::all();
        }
        Self { paths }
    }

    /// Unrestricted selection
    pub fn all() -> Self {
        Self { paths: Vec::new() }
    }

    /// Returns true if records are returned whole
    pub fn is_all(&self) -> bool {
        self.paths.is_empty()
    }

    /// Selected paths in request order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

/// Projects `records` through `selection`.
///
/// A path is written only when it resolves to a truthy value; a record with
/// no written path is left out of the result.
pub fn project(records: &RecordSet, selection: &Selection) -> RecordSet {
    if selection.is_all() {
        return records.clone();
    }

    let mut results = RecordSet::new();
    for (key, record) in records {
        let mut shaped = Record::new();
        for path in selection.paths() {
            if let Some(value) = resolve(record, path).filter(|v| is_truthy(v)) {
                insert_at_path(&mut shaped, path, value.clone());
            }
        }
        if !shaped.is_empty() {
            results.insert(key.clone(), shaped);
        }
    }
    results
}
