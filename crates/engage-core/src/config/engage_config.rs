//! Top-level Engage configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{FormsConfig, QuoteConfig, StorageConfig, TelemetryConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ENGAGE_*`)
/// 2. Project config (`engage.toml` in the site root)
/// 3. User config (`~/.engage/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngageConfig {
    pub telemetry: TelemetryConfig,
    pub forms: FormsConfig,
    pub quote: QuoteConfig,
    pub storage: StorageConfig,
}

impl EngageConfig {
    /// Load configuration with layered resolution, then validate it.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Unreadable user files are skipped,
        // but invalid TOML is reported.
        if let Some(user_config_path) = user_dir().map(|d| d.join("config.toml")) {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!("config: skipping user config: {e}");
                    }
                }
            }
        }

        let project_config_path = root.join("engage.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &EngageConfig) -> Result<(), ConfigError> {
        if let Some(ratio) = config.telemetry.visibility_ratio {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "telemetry.visibility_ratio".to_string(),
                    message: "must be greater than 0.0 and at most 1.0".to_string(),
                });
            }
        }
        if let Some(bad) = config
            .telemetry
            .scroll_thresholds
            .iter()
            .find(|t| !(1..=100).contains(*t))
        {
            return Err(ConfigError::ValidationFailed {
                field: "telemetry.scroll_thresholds".to_string(),
                message: format!("threshold {bad} must be between 1 and 100"),
            });
        }
        if config.telemetry.debounce_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "telemetry.debounce_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref endpoint) = config.forms.endpoint {
            if let Err(e) = url::Url::parse(endpoint) {
                return Err(ConfigError::ValidationFailed {
                    field: "forms.endpoint".to_string(),
                    message: format!("must be an absolute URL: {e}"),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut EngageConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EngageConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut EngageConfig, other: &EngageConfig) {
        // Telemetry
        if other.telemetry.collector_id.is_some() {
            base.telemetry.collector_id = other.telemetry.collector_id.clone();
        }
        if !other.telemetry.scroll_thresholds.is_empty() {
            base.telemetry.scroll_thresholds = other.telemetry.scroll_thresholds.clone();
        }
        if other.telemetry.debounce_ms.is_some() {
            base.telemetry.debounce_ms = other.telemetry.debounce_ms;
        }
        if other.telemetry.visibility_ratio.is_some() {
            base.telemetry.visibility_ratio = other.telemetry.visibility_ratio;
        }

        // Forms
        if other.forms.endpoint.is_some() {
            base.forms.endpoint = other.forms.endpoint.clone();
        }
        if other.forms.form_id.is_some() {
            base.forms.form_id = other.forms.form_id.clone();
        }
        if other.forms.pending_label.is_some() {
            base.forms.pending_label = other.forms.pending_label.clone();
        }
        if other.forms.timeout_secs.is_some() {
            base.forms.timeout_secs = other.forms.timeout_secs;
        }

        // Quote
        if other.quote.contact_path.is_some() {
            base.quote.contact_path = other.quote.contact_path.clone();
        }

        // Storage
        if other.storage.preferences_path.is_some() {
            base.storage.preferences_path = other.storage.preferences_path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ENGAGE_FORMS_ENDPOINT`, `ENGAGE_TELEMETRY_COLLECTOR_ID`, etc.
    fn apply_env_overrides(config: &mut EngageConfig) {
        if let Ok(val) = std::env::var("ENGAGE_TELEMETRY_COLLECTOR_ID") {
            config.telemetry.collector_id = Some(val);
        }
        if let Ok(val) = std::env::var("ENGAGE_TELEMETRY_DEBOUNCE_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.telemetry.debounce_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ENGAGE_TELEMETRY_VISIBILITY_RATIO") {
            if let Ok(v) = val.parse::<f64>() {
                config.telemetry.visibility_ratio = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ENGAGE_FORMS_ENDPOINT") {
            config.forms.endpoint = Some(val);
        }
        if let Ok(val) = std::env::var("ENGAGE_FORMS_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.forms.timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ENGAGE_STORAGE_PREFERENCES_PATH") {
            config.storage.preferences_path = Some(PathBuf::from(val));
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level engage config directory: `~/.engage/`.
pub(crate) fn user_dir() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".engage"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
