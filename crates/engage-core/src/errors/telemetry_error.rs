//! Analytics delivery errors. Always swallowed by the emitter.

use super::error_code::{self, EngageErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("analytics collector unavailable: {reason}")]
    CollectorUnavailable { reason: String },

    #[error("failed to deliver event {event}: {reason}")]
    DeliveryFailed { event: String, reason: String },
}

impl EngageErrorCode for TelemetryError {
    fn error_code(&self) -> &'static str {
        error_code::TELEMETRY_ERROR
    }
}
