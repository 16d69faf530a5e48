//! EngageErrorCode trait for host-facing error reporting.

/// Trait for mapping Engage errors to stable error code strings.
/// Every error enum implements this so hosts can branch on a code
/// instead of parsing messages.
pub trait EngageErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const TELEMETRY_ERROR: &str = "TELEMETRY_ERROR";
pub const SUBMISSION_ERROR: &str = "SUBMISSION_ERROR";
pub const SUBMISSION_REJECTED: &str = "SUBMISSION_REJECTED";
pub const UNKNOWN_TIER: &str = "UNKNOWN_TIER";
