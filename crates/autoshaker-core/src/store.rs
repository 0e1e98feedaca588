//! Configuration persistence.
//!
//! The toggle writes the whole configuration after every flip. Writes run
//! on the blocking pool, so a [`ConfigStore`] must be shareable across
//! threads.
//!
//! The YAML file may hold sections owned by other components (the
//! harness keeps a `harness:` block there). [`YamlFileStore`] rewrites the
//! shaker's keys and leaves every other top-level key as it was. Writes to
//! one store are serialized, and each lands through a temporary file and a
//! rename, so a reader never sees a half-written document.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde_yml::Value;

use crate::config::{ConfigError, ShakerConfig};

/// Somewhere the configuration can be saved to and read back from.
pub trait ConfigStore: Send + Sync + 'static {
    /// Persist `config`, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the write fails.
    fn write(&self, config: &ShakerConfig) -> Result<(), ConfigError>;

    /// Read the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if nothing valid is stored.
    fn read(&self) -> Result<ShakerConfig, ConfigError>;
}

/// A YAML file on disk.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
    /// Held across each read-modify-write. Clones share it.
    lock: Arc<Mutex<()>>,
}

impl YamlFileStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load_or_default(&self) -> Result<ShakerConfig, ConfigError> {
        if self.path.exists() {
            self.read()
        } else {
            tracing::info!(path = %self.path.display(), "no config file, using defaults");
            Ok(ShakerConfig::default())
        }
    }

    /// The whole file as an untyped YAML document, shaker keys and foreign
    /// sections alike. `None` if the file is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn read_document(&self) -> Result<Option<Value>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_yml::from_str(&contents)?))
    }
}

impl ConfigStore for YamlFileStore {
    fn write(&self, config: &ShakerConfig) -> Result<(), ConfigError> {
        let fresh = serde_yml::to_value(config)?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let document = match self.read_document()? {
            Some(Value::Mapping(mut existing)) => {
                if let Value::Mapping(options) = fresh {
                    for (key, value) in options {
                        existing.insert(key, value);
                    }
                }
                Value::Mapping(existing)
            }
            _ => fresh,
        };
        let staging = self.path.with_extension("yaml.tmp");
        std::fs::write(&staging, serde_yml::to_string(&document)?)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn read(&self) -> Result<ShakerConfig, ConfigError> {
        ShakerConfig::from_file(&self.path)
    }
}
