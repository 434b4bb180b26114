//! Application state for the ESI API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::SettingsStore;
use crate::store::PayrollStore;

use super::auth::SessionRegistry;

/// Shared application state.
///
/// Holds the payroll data source, the settings store and the session
/// registry behind `Arc`s so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PayrollStore>,
    settings: Arc<dyn SettingsStore>,
    sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        store: Arc<dyn PayrollStore>,
        settings: Arc<dyn SettingsStore>,
        sessions: SessionRegistry,
    ) -> Self {
        Self {
            store,
            settings,
            sessions: Arc::new(sessions),
        }
    }

    /// Returns the payroll store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }

    /// Returns the settings store.
    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    /// Returns the session registry.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}
