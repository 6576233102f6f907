//! Observable events for quilldb
//!
//! Every line the logger emits names one of these events.

use std::fmt;

/// Observable events in a store session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded and validated
    ConfigLoaded,

    // Load
    /// Collection read and decoded
    CollectionLoaded,
    /// Backing resource absent, collection treated as empty
    CollectionMissing,
    /// Backing resource exists but is not a record array
    CollectionMalformed,

    // Filtering
    /// A filter narrowed the working set
    FilterApplied,
    /// A comparison used an operator that never matches
    UnsupportedOperator,

    // Mutation
    /// Records appended with fresh keys
    RecordsInserted,
    /// Records patched in place
    RecordsUpdated,
    /// Records removed by key
    RecordsRemoved,
    /// Collection snapshot written to the backend
    CollectionWritten,
    /// Collection emptied
    CollectionTruncated,
    /// Backend rejected a write
    WriteFailed,
}

impl Event {
    /// Returns the string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CollectionLoaded => "COLLECTION_LOADED",
            Event::CollectionMissing => "COLLECTION_MISSING",
            Event::CollectionMalformed => "COLLECTION_MALFORMED",
            Event::FilterApplied => "FILTER_APPLIED",
            Event::UnsupportedOperator => "UNSUPPORTED_OPERATOR",
            Event::RecordsInserted => "RECORDS_INSERTED",
            Event::RecordsUpdated => "RECORDS_UPDATED",
            Event::RecordsRemoved => "RECORDS_REMOVED",
            Event::CollectionWritten => "COLLECTION_WRITTEN",
            Event::CollectionTruncated => "COLLECTION_TRUNCATED",
            Event::WriteFailed => "WRITE_FAILED",
        }
    }

    /// Returns true if this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::CollectionMalformed | Event::WriteFailed)
    }

    /// Returns true if this event is per-call noise worth hiding by default
    pub fn is_verbose(&self) -> bool {
        matches!(self, Event::FilterApplied)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
