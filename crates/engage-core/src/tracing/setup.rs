//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Env var holding the filter directives.
pub const LOG_FILTER_ENV: &str = "ENGAGE_LOG";

/// Env var selecting the output format (`text` or `json`).
pub const LOG_FORMAT_ENV: &str = "ENGAGE_LOG_FORMAT";

const DEFAULT_FILTER: &str = "engage=info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines with targets.
    #[default]
    Text,
    /// One JSON object per line, for hosts that ship logs to a collector.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Initialize logging from `ENGAGE_LOG` and `ENGAGE_LOG_FORMAT`.
///
/// Filter format: `ENGAGE_LOG=engage_telemetry=debug,engage_forms=info`.
/// Falls back to `engage=info` when unset or invalid.
pub fn init_tracing() {
    init_tracing_with(LogFormat::from_env());
}

/// Initialize logging with an explicit format. Only the first call in a
/// process installs a subscriber; later calls are no-ops.
pub fn init_tracing_with(format: LogFormat) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let json = format == LogFormat::Json;
        let text_layer = (!json).then(|| fmt::layer().with_target(true));
        let json_layer = json.then(|| {
            fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
        });

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(text_layer)
            .with(json_layer)
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(?format, "tracing: initialized");
        }
    });
}
