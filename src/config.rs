//! # Service Configuration
//!
//! Loaded from a JSON file. Every field has a default, so a partial (or
//! missing) file is valid.
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 8081 },
//!   "store": { "backend": "file", "data_dir": "./data", "collection": "users" },
//!   "routes": { "get": "/users/get" },
//!   "verbose": true,
//!   "log_level": "debug"
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::{AdapterOptions, HttpServerConfig, RouteConfig};
use crate::store::{FileStore, MemoryStore, RecordStore, StoreResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which record store backs the collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

/// Store selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Directory holding the operation log (file backend only)
    pub data_dir: Option<PathBuf>,

    /// Collection name, also the log file stem
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: None,
            collection: "users".to_string(),
        }
    }
}

impl StoreConfig {
    /// Open the configured store
    pub fn open(&self) -> StoreResult<Arc<dyn RecordStore>> {
        let store: Arc<dyn RecordStore> = match (self.backend, &self.data_dir) {
            (StoreBackend::File, Some(dir)) => Arc::new(FileStore::open(dir, &self.collection)?),
            // validate() rejects a file backend without data_dir
            _ => Arc::new(MemoryStore::new()),
        };
        Ok(store)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.collection.is_empty()
            || !self
                .collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid(format!(
                "collection name {:?} must be non-empty and use [A-Za-z0-9_-]",
                self.collection
            )));
        }
        if self.backend == StoreBackend::File && self.data_dir.is_none() {
            return Err(ConfigError::Invalid(
                "store.data_dir is required for the file backend".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: HttpServerConfig,
    pub store: StoreConfig,
    pub routes: RouteConfig,

    /// Log every decoded request and encoded response
    pub verbose: bool,

    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            store: StoreConfig::default(),
            routes: RouteConfig::default(),
            verbose: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.routes.validate().map_err(ConfigError::Invalid)?;
        self.store.validate()?;

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            verbose: self.verbose,
        }
    }
}
