//! Preference storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Preference file path. Default: `~/.engage/preferences.json`.
    pub preferences_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Returns the configured path, falling back to the user directory.
    /// `None` when no home directory can be resolved either.
    pub fn effective_preferences_path(&self) -> Option<PathBuf> {
        self.preferences_path
            .clone()
            .or_else(|| super::engage_config::user_dir().map(|d| d.join("preferences.json")))
    }
}
