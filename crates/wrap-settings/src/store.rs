//! Key-value persistence for the configuration object.

use crate::SettingsError;
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the configuration object is loaded from and saved to.
pub trait SettingsStore {
    /// Load the persisted object; `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Value>, SettingsError>;

    /// Persist the object, replacing what was stored before.
    fn save(&mut self, data: &Value) -> Result<(), SettingsError>;
}

/// In-memory store, for tests and hosts that persist settings themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Option<Value>,
    save_count: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `data`.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            save_count: 0,
        }
    }

    /// Currently stored object.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>, SettingsError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &Value) -> Result<(), SettingsError> {
        self.data = Some(data.clone());
        self.save_count += 1;
        Ok(())
    }
}

/// JSON file on disk.
///
/// A missing or empty file loads as "nothing saved". A file that is not valid JSON is logged
/// and also treated as absent, so the caller falls back to defaults.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the default settings file (see [`crate::config_paths::settings_file`]).
    pub fn default_location() -> Result<Self, SettingsError> {
        crate::config_paths::settings_file()
            .map(Self::new)
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>, SettingsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("settings file not found at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&content) {
            Ok(value) => {
                tracing::debug!("loaded settings from {}", self.path.display());
                Ok(Some(value))
            }
            Err(e) => {
                tracing::warn!(
                    "failed to parse settings at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Writes to a temporary file next to the target and renames it into place, so an
    /// interrupted save leaves the previous file intact.
    fn save(&mut self, data: &Value) -> Result<(), SettingsError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let content = serde_json::to_string_pretty(data)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        tracing::info!("saved settings to {}", self.path.display());
        Ok(())
    }
}
