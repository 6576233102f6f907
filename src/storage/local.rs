//! # Local Filesystem Backend
//!
//! Collection `name` lives at `<root>/<name>.json`.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::backend::CollectionBackend;
use super::errors::{StorageError, StorageResult};

/// File extension of collection files
pub const COLLECTION_EXTENSION: &str = "json";

/// How a collection file is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and overwrite in place; concurrent writers race, last wins
    #[default]
    Direct,
    /// Write a sibling temp file, fsync, then rename over the target
    Atomic,
}

/// Local filesystem collection backend
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
    write_mode: WriteMode,
    lock_writes: bool,
}

impl LocalBackend {
    /// Create a backend rooted at `root` with direct writes
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_mode: WriteMode::Direct,
            lock_writes: false,
        }
    }

    /// Sets the write mode
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Serializes writers through an exclusive lock on `<name>.json.lock`
    pub fn with_write_lock(mut self, enabled: bool) -> Self {
        self.lock_writes = enabled;
        self
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configured write mode
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Path of the file backing `collection`
    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", collection, COLLECTION_EXTENSION))
    }

    fn sibling(path: &Path, suffix: &str) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    // Held until the returned file is dropped
    fn acquire_lock(path: &Path) -> std::io::Result<File> {
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(Self::sibling(path, ".lock"))?;
        FileExt::lock_exclusive(&lock_file)?;
        Ok(lock_file)
    }

    fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
        let tmp_path = Self::sibling(path, ".tmp");

        let result = (|| -> std::io::Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

impl CollectionBackend for LocalBackend {
    fn read(&self, collection: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(collection)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                collection: collection.to_string(),
                source: e,
            }),
        }
    }

    fn write(&self, collection: &str, contents: &str) -> StorageResult<()> {
        let path = self.path_for(collection);

        let result = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| {
                let _guard = if self.lock_writes {
                    Some(Self::acquire_lock(&path)?)
                } else {
                    None
                };
                match self.write_mode {
                    WriteMode::Direct => fs::write(&path, contents),
                    WriteMode::Atomic => Self::write_atomic(&path, contents),
                }
            });

        result.map_err(|e| StorageError::WriteFailed {
            collection: collection.to_string(),
            source: e,
        })
    }

    fn location(&self, collection: &str) -> String {
        self.path_for(collection).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_collection_reads_none() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());
        assert!(backend.read("nothing").unwrap().is_none());
    }

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        backend.write("contacts", "[]").unwrap();
        assert_eq!(backend.read("contacts").unwrap().as_deref(), Some("[]"));
        assert!(temp.path().join("contacts.json").is_file());
    }

    #[test]
    fn test_write_creates_root() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("nested/data"));

        backend.write("c", "[1]").unwrap();
        assert_eq!(backend.read("c").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).with_write_mode(WriteMode::Atomic);

        backend.write("c", "[]").unwrap();
        backend.write("c", "[{}]").unwrap();

        assert_eq!(backend.read("c").unwrap().as_deref(), Some("[{}]"));
        assert!(!temp.path().join("c.json.tmp").exists());
    }

    #[test]
    fn test_locked_writes() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path())
            .with_write_mode(WriteMode::Atomic)
            .with_write_lock(true);

        backend.write("c", "[]").unwrap();
        backend.write("c", "[{}]").unwrap();

        assert_eq!(backend.read("c").unwrap().as_deref(), Some("[{}]"));
        assert!(temp.path().join("c.json.lock").exists());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let backend = LocalBackend::new(&blocker);
        let err = backend.write("c", "[]").unwrap_err();
        assert_eq!(err.code(), "QUILL_STORAGE_WRITE_FAILED");
    }

    #[test]
    fn test_write_mode_serde() {
        let mode: WriteMode = serde_json::from_str("\"atomic\"").unwrap();
        assert_eq!(mode, WriteMode::Atomic);
        assert_eq!(WriteMode::default(), WriteMode::Direct);
    }
}
