use std::future::Future;

use crate::errors::SubmissionError;

/// Status returned by a form submission endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
}

impl TransportResponse {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Any 2xx status counts as success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Third-party form-submission endpoint.
///
/// One call is one network attempt. Implementations must not retry;
/// retrying is a user action (submitting again).
pub trait FormTransport: Send + Sync {
    /// POST the fields form-encoded to `endpoint` with `Accept: application/json`.
    fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> impl Future<Output = Result<TransportResponse, SubmissionError>> + Send;
}
