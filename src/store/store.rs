//! Store: entry point that opens sessions over a backend

use std::path::PathBuf;

use super::errors::{StoreError, StoreResult};
use super::keys::{KeyGenerator, UuidKeyGenerator};
use super::session::{Session, WriteResult};
use crate::config::StoreConfig;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::storage::{codec, CollectionBackend, LocalBackend};

/// Owns the backend and key generator shared by all sessions
#[derive(Debug)]
pub struct Store {
    backend: Box<dyn CollectionBackend>,
    keys: Box<dyn KeyGenerator>,
}

impl Store {
    /// Creates a store over any backend
    pub fn new(backend: impl CollectionBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            keys: Box::new(UuidKeyGenerator),
        }
    }

    /// Creates a store over `<dir>/<collection>.json` files with direct writes
    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self::new(LocalBackend::new(dir))
    }

    /// Creates a store from configuration and applies its log level
    pub fn open(config: &StoreConfig) -> Self {
        Logger::set_min_severity(config.log_severity());
        Self::new(
            LocalBackend::new(&config.data_dir)
                .with_write_mode(config.write_mode)
                .with_write_lock(config.lock_writes),
        )
    }

    /// Replaces the key generator used for inserts
    pub fn with_key_generator(mut self, keys: impl KeyGenerator + 'static) -> Self {
        self.keys = Box::new(keys);
        self
    }

    /// Backend in use
    pub fn backend(&self) -> &dyn CollectionBackend {
        self.backend.as_ref()
    }

    pub(crate) fn keys(&self) -> &dyn KeyGenerator {
        self.keys.as_ref()
    }

    /// Loads `collection` and opens a session over it.
    ///
    /// A missing collection loads as empty. Malformed contents are an error.
    pub fn from(&self, collection: &str) -> StoreResult<Session<'_>> {
        let location = self.backend.location(collection);

        let records = match self.backend.read(collection)? {
            None => {
                log_event_with_fields(
                    Event::CollectionMissing,
                    &[("collection", collection), ("location", location.as_str())],
                );
                Default::default()
            }
            Some(text) => match codec::decode(collection, &text) {
                Ok(records) => {
                    log_event_with_fields(
                        Event::CollectionLoaded,
                        &[
                            ("collection", collection),
                            ("location", location.as_str()),
                            ("records", records.len().to_string().as_str()),
                        ],
                    );
                    records
                }
                Err(e) => {
                    log_event_with_fields(
                        Event::CollectionMalformed,
                        &[
                            ("collection", collection),
                            ("location", location.as_str()),
                            ("reason", e.to_string().as_str()),
                        ],
                    );
                    return Err(StoreError::from(e));
                }
            },
        };

        Ok(Session::new(self, collection, records))
    }

    /// Empties `collection` without loading it first
    pub fn truncate(&self, collection: &str) -> StoreResult<WriteResult> {
        self.write(collection, codec::empty(), 0)?;
        log_event_with_fields(Event::CollectionTruncated, &[("collection", collection)]);
        Ok(WriteResult::default())
    }

    pub(crate) fn write(&self, collection: &str, contents: &str, records: usize) -> StoreResult<()> {
        let location = self.backend.location(collection);

        if let Err(e) = self.backend.write(collection, contents) {
            log_event_with_fields(
                Event::WriteFailed,
                &[
                    ("collection", collection),
                    ("location", location.as_str()),
                    ("reason", e.to_string().as_str()),
                ],
            );
            return Err(e.into());
        }

        log_event_with_fields(
            Event::CollectionWritten,
            &[
                ("collection", collection),
                ("location", location.as_str()),
                ("records", records.to_string().as_str()),
            ],
        );
        Ok(())
    }
}
