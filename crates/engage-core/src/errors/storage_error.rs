//! Preference storage errors.

use super::error_code::{self, EngageErrorCode};

/// Errors raised by a `PreferenceStore`. Callers treat all of them as
/// "storage unavailable" and fail open.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("preference storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("failed to read preferences from {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("failed to write preferences to {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("corrupt preference file {path}: {message}")]
    Corrupt { path: String, message: String },
}

impl EngageErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::STORAGE_UNAVAILABLE,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
