//! TelemetrySwitch: the process-wide suppression flag.

use std::sync::atomic::{AtomicBool, Ordering};

use engage_core::config::TelemetryConfig;

/// Suppression flag keyed by the analytics collector id.
///
/// Shared (via `Arc`) between the consent gate, which flips it, and the
/// emitter, which checks it before every send. Starts unsuppressed:
/// tracking is on until the visitor declines.
#[derive(Debug)]
pub struct TelemetrySwitch {
    collector_id: String,
    suppressed: AtomicBool,
}

impl TelemetrySwitch {
    pub fn new(collector_id: impl Into<String>) -> Self {
        Self {
            collector_id: collector_id.into(),
            suppressed: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::new(config.effective_collector_id())
    }

    pub fn collector_id(&self) -> &str {
        &self.collector_id
    }

    /// Name of the host-side global that disables the collector,
    /// e.g. `ga-disable-G-XXXXXXXXXX`.
    pub fn suppression_key(&self) -> String {
        format!("ga-disable-{}", self.collector_id)
    }

    pub fn set_suppressed(&self, suppressed: bool) {
        let was = self.suppressed.swap(suppressed, Ordering::SeqCst);
        if was != suppressed {
            tracing::debug!(collector = %self.collector_id, suppressed, "telemetry: suppression changed");
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst)
    }
}
