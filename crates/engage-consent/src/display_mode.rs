//! Display-mode (light/dark) preference.

use std::sync::{Arc, Mutex, PoisonError};

use engage_core::constants::DISPLAY_MODE_KEY;
use engage_core::traits::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Light,
    Dark,
}

impl DisplayMode {
    /// Stored flag value: `enabled` means dark.
    pub fn as_stored(&self) -> &'static str {
        match self {
            Self::Light => "disabled",
            Self::Dark => "enabled",
        }
    }

    /// Screen-reader announcement after switching to this mode.
    pub fn announcement(&self) -> &'static str {
        match self {
            Self::Light => "Light mode activated.",
            Self::Dark => "Dark mode activated.",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// The visitor's display-mode choice, read at load and written on change.
pub struct DisplayModePreference {
    store: Arc<dyn PreferenceStore>,
    mode: Mutex<DisplayMode>,
}

impl DisplayModePreference {
    pub fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let mode = match store.get(DISPLAY_MODE_KEY) {
            Ok(Some(v)) if v == "enabled" => DisplayMode::Dark,
            Ok(_) => DisplayMode::Light,
            Err(e) => {
                tracing::warn!("display mode: storage unavailable, using light: {e}");
                DisplayMode::Light
            }
        };
        Self {
            store,
            mode: Mutex::new(mode),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip the mode, persist it, and return the new mode.
    pub fn toggle(&self) -> DisplayMode {
        let mut mode = self.mode.lock().unwrap_or_else(PoisonError::into_inner);
        *mode = mode.toggled();
        if let Err(e) = self.store.set(DISPLAY_MODE_KEY, mode.as_stored()) {
            tracing::warn!("display mode: failed to persist: {e}");
        }
        *mode
    }
}
