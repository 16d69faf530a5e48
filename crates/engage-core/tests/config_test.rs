//! Tests for the Engage configuration system.

use std::sync::Mutex;

use engage_core::config::EngageConfig;
use engage_core::errors::{ConfigError, EngageErrorCode};

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_engage_env_vars() {
    for key in [
        "ENGAGE_TELEMETRY_COLLECTOR_ID",
        "ENGAGE_TELEMETRY_DEBOUNCE_MS",
        "ENGAGE_TELEMETRY_VISIBILITY_RATIO",
        "ENGAGE_FORMS_ENDPOINT",
        "ENGAGE_FORMS_TIMEOUT_SECS",
        "ENGAGE_STORAGE_PREFERENCES_PATH",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_match_site_behaviour() {
    let config = EngageConfig::default();
    assert_eq!(config.telemetry.effective_collector_id(), "G-XXXXXXXXXX");
    assert_eq!(
        config.telemetry.effective_scroll_thresholds(),
        vec![25, 50, 75, 100]
    );
    assert_eq!(config.telemetry.effective_debounce_ms(), 500);
    assert!((config.telemetry.effective_visibility_ratio() - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.forms.effective_form_id(), "contact-form");
    assert_eq!(config.forms.effective_pending_label(), "Sending...");
    assert_eq!(config.forms.effective_timeout().as_secs(), 30);
    assert_eq!(config.quote.effective_contact_path(), "/contact.html");
}

#[test]
fn project_file_then_env_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_engage_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("engage.toml"),
        r#"
[telemetry]
collector_id = "G-PROJECT"
scroll_thresholds = [50, 25, 50]

[forms]
endpoint = "https://forms.example.com/f/abc"
"#,
    )
    .unwrap();

    std::env::set_var("ENGAGE_TELEMETRY_COLLECTOR_ID", "G-ENV");
    let config = EngageConfig::load(dir.path()).unwrap();
    clear_engage_env_vars();

    assert_eq!(config.telemetry.effective_collector_id(), "G-ENV");
    assert_eq!(config.telemetry.effective_scroll_thresholds(), vec![25, 50]);
    assert_eq!(
        config.forms.endpoint.as_deref(),
        Some("https://forms.example.com/f/abc")
    );
}

#[test]
fn missing_project_file_yields_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_engage_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = EngageConfig::load(dir.path()).unwrap();
    assert!(config.forms.endpoint.is_none());
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = EngageConfig::from_toml("[telemetry\ncollector_id = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn out_of_range_values_fail_validation() {
    let err = EngageConfig::from_toml("[telemetry]\nvisibility_ratio = 1.5").unwrap_err();
    assert!(
        matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "telemetry.visibility_ratio")
    );

    let err = EngageConfig::from_toml("[telemetry]\nscroll_thresholds = [0, 50]").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = EngageConfig::from_toml("[telemetry]\ndebounce_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = EngageConfig::from_toml("[forms]\nendpoint = \"not a url\"").unwrap_err();
    assert!(err.coded_string().starts_with("[CONFIG_ERROR]"));
}

#[test]
fn config_round_trips_through_toml() {
    let config = EngageConfig::from_toml(
        r#"
[quote]
contact_path = "/get-in-touch"
"#,
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let again = EngageConfig::from_toml(&text).unwrap();
    assert_eq!(again.quote.effective_contact_path(), "/get-in-touch");
}
