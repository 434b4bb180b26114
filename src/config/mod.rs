//! Configuration loading and management for the ESI contribution engine.
//!
//! This module loads the payroll data directory and sessions from YAML files
//! and persists the ESI rate settings.
//!
//! # Example
//!
//! ```no_run
//! use esi_engine::config::{DataLoader, JsonFileSettingsStore, SettingsStore};
//!
//! let loader = DataLoader::load("./data/sample").unwrap();
//! let settings = JsonFileSettingsStore::new("./data/sample/esi_settings.json")
//!     .load()
//!     .unwrap();
//! println!("{} employees, threshold {}", loader.data().employees.len(), settings.esi_threshold);
//! ```

mod cli;
mod loader;
mod settings;
mod types;

pub use cli::{CliArgs, DEFAULT_SETTINGS_FILE};
pub use loader::DataLoader;
pub use settings::{InMemorySettingsStore, JsonFileSettingsStore, SettingsStore};
pub use types::{ContributionSettings, PayrollData, Permission, SessionGrant};
