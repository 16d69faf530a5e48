//! Telemetry configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the telemetry emitter and its observers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Analytics collector identifier. Keys the global suppression flag.
    pub collector_id: Option<String>,
    /// Scroll-depth thresholds in percent. Default: 25, 50, 75, 100.
    pub scroll_thresholds: Vec<u8>,
    /// Scroll quiescence window in milliseconds. Default: 500.
    pub debounce_ms: Option<u64>,
    /// Visible fraction at which a watched target counts as viewed. Default: 0.5.
    pub visibility_ratio: Option<f64>,
}

impl TelemetryConfig {
    pub fn effective_collector_id(&self) -> String {
        self.collector_id
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_COLLECTOR_ID.to_string())
    }

    /// Thresholds sorted ascending and de-duplicated.
    pub fn effective_scroll_thresholds(&self) -> Vec<u8> {
        if self.scroll_thresholds.is_empty() {
            return constants::DEFAULT_SCROLL_THRESHOLDS.to_vec();
        }
        let mut thresholds = self.scroll_thresholds.clone();
        thresholds.sort_unstable();
        thresholds.dedup();
        thresholds
    }

    pub fn effective_debounce_ms(&self) -> u64 {
        self.debounce_ms
            .unwrap_or(constants::DEFAULT_SCROLL_DEBOUNCE_MS)
    }

    pub fn effective_visibility_ratio(&self) -> f64 {
        self.visibility_ratio
            .unwrap_or(constants::DEFAULT_VISIBILITY_RATIO)
    }
}
