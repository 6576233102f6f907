//! Store configuration
//!
//! Loaded from a JSON file:
//!
//! ```json
//! { "data_dir": "./data", "write_mode": "atomic", "lock_writes": true, "log_level": "info" }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Severity};
use crate::storage::WriteMode;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `<collection>.json` files (required)
    pub data_dir: PathBuf,

    /// How collection files are replaced (optional, default "direct")
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Take an exclusive lock file around each write (optional, default false)
    #[serde(default)]
    pub lock_writes: bool,

    /// Minimum log level (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl StoreConfig {
    /// Configuration with defaults for everything but the data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_mode: WriteMode::default(),
            lock_writes: false,
            log_level: default_log_level(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: StoreConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        config.validate()?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("data_dir", config.data_dir.display().to_string().as_str()),
                ("path", path.display().to_string().as_str()),
            ],
        );

        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".to_string()));
        }

        self.log_level
            .parse::<Severity>()
            .map_err(ConfigError::Invalid)?;

        Ok(())
    }

    /// Parsed log level; falls back to WARN
    pub fn log_severity(&self) -> Severity {
        self.log_level.parse().unwrap_or(Severity::Warn)
    }
}
