//! Quote input errors raised at the parsing boundary.

use super::error_code::{self, EngageErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("unknown tier: {value}")]
    UnknownTier { value: String },
}

impl EngageErrorCode for QuoteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTier { .. } => error_code::UNKNOWN_TIER,
        }
    }
}
