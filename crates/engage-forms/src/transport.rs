//! HTTP form transport over reqwest.

use std::time::Duration;

use reqwest::header::ACCEPT;
use url::Url;

use engage_core::config::FormsConfig;
use engage_core::errors::SubmissionError;
use engage_core::traits::{FormTransport, TransportResponse};

/// Posts form-encoded fields with `Accept: application/json`. One request
/// per call, no retry.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

fn transport_err(e: reqwest::Error) -> SubmissionError {
    SubmissionError::Transport {
        reason: e.to_string(),
    }
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(transport_err)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &FormsConfig) -> Result<Self, SubmissionError> {
        Self::new(config.effective_timeout())
    }
}

impl FormTransport for ReqwestTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<TransportResponse, SubmissionError> {
        let url = Url::parse(endpoint).map_err(|e| SubmissionError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(%url, fields = fields.len(), "forms: posting submission");
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(fields)
            .send()
            .await
            .map_err(transport_err)?;

        Ok(TransportResponse::new(response.status().as_u16()))
    }
}
