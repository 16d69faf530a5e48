//! Form submission errors.

use super::error_code::{self, EngageErrorCode};

/// Errors from the single network attempt of a form submission.
/// Any of these moves the pipeline to `Failed`; the user retries by
/// submitting again.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission endpoint not configured")]
    EndpointMissing,

    #[error("invalid submission endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("transport error: {reason}")]
    Transport { reason: String },

    #[error("endpoint rejected submission with HTTP {status}")]
    Rejected { status: u16 },
}

impl EngageErrorCode for SubmissionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => error_code::SUBMISSION_REJECTED,
            _ => error_code::SUBMISSION_ERROR,
        }
    }
}
