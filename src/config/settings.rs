//! Persistence for [`ContributionSettings`].
//!
//! Settings sit behind the [`SettingsStore`] trait so handlers never touch a
//! global file directly. The JSON file store is what the server uses; the
//! in-memory store backs tests.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::ContributionSettings;

/// Reads and replaces the ESI settings document.
pub trait SettingsStore: Send + Sync {
    /// Returns the current settings, or the defaults if none were saved yet.
    fn load(&self) -> EngineResult<ContributionSettings>;

    /// Replaces the stored settings wholesale.
    fn save(&self, settings: &ContributionSettings) -> EngineResult<()>;
}

/// Stores settings as a pretty-printed JSON document on disk.
///
/// # Example
///
/// ```no_run
/// use esi_engine::config::{ContributionSettings, JsonFileSettingsStore, SettingsStore};
///
/// let store = JsonFileSettingsStore::new("./data/esi_settings.json");
/// store.save(&ContributionSettings::default())?;
/// # Ok::<(), esi_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSettingsStore {
    /// Creates a store backed by the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> EngineResult<ContributionSettings> {
        let path_str = self.path.display().to_string();

        if !self.path.exists() {
            debug!(path = %path_str, "No settings file yet, using defaults");
            return Ok(ContributionSettings::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn save(&self, settings: &ContributionSettings) -> EngineResult<()> {
        let path_str = self.path.display().to_string();
        let body =
            serde_json::to_string_pretty(settings).map_err(|e| EngineError::SettingsWriteFailed {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        let _guard = self.write_lock.lock();
        fs::write(&self.path, body).map_err(|e| EngineError::SettingsWriteFailed {
            path: path_str,
            message: e.to_string(),
        })
    }
}

/// Keeps settings in memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<Option<ContributionSettings>>,
}

impl InMemorySettingsStore {
    /// Creates a store that starts with the given settings.
    pub fn with_settings(settings: ContributionSettings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> EngineResult<ContributionSettings> {
        Ok(self.settings.read().unwrap_or_default())
    }

    fn save(&self, settings: &ContributionSettings) -> EngineResult<()> {
        *self.settings.write() = Some(*settings);
        Ok(())
    }
}
