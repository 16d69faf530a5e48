use crate::errors::TelemetryError;
use crate::types::TelemetryEvent;

/// Third-party analytics ingestion endpoint.
///
/// Receives events verbatim. Delivery is best-effort; the emitter logs and
/// drops any error returned here.
pub trait AnalyticsSink: Send + Sync {
    fn send(&self, event: &TelemetryEvent) -> Result<(), TelemetryError>;
}
