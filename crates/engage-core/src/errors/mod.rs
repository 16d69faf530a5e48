//! Error handling for Engage.
//! One error enum per subsystem, `thiserror` only.
//!
//! Validation failures are not errors: they are returned as values by the
//! validation engine so every field can be reported at once.

pub mod config_error;
pub mod error_code;
pub mod quote_error;
pub mod storage_error;
pub mod submission_error;
pub mod telemetry_error;

pub use config_error::ConfigError;
pub use error_code::EngageErrorCode;
pub use quote_error::QuoteError;
pub use storage_error::StorageError;
pub use submission_error::SubmissionError;
pub use telemetry_error::TelemetryError;
