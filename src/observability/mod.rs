//! Observability for quilldb
//!
//! Structured JSON-line logging of typed store events.
//!
//! # Usage
//!
//! ```ignore
//! use quilldb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::CollectionWritten, &[("collection", "contacts")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

impl Event {
    /// Severity an event is logged at
    pub fn severity(&self) -> Severity {
        if self.is_failure() {
            Severity::Error
        } else if self.is_verbose() {
            Severity::Trace
        } else if *self == Event::UnsupportedOperator {
            Severity::Warn
        } else {
            Severity::Info
        }
    }
}

/// Log a store event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a store event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
