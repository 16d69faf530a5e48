//! Contact form submission configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormsConfig {
    /// Form submission endpoint (absolute URL).
    pub endpoint: Option<String>,
    /// Identifier reported with `contact_form_submit`.
    pub form_id: Option<String>,
    /// Submit label while a submission is in flight.
    pub pending_label: Option<String>,
    /// Network timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl FormsConfig {
    pub fn effective_form_id(&self) -> String {
        self.form_id
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_FORM_ID.to_string())
    }

    pub fn effective_pending_label(&self) -> String {
        self.pending_label
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_PENDING_LABEL.to_string())
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .unwrap_or(constants::DEFAULT_SUBMIT_TIMEOUT_SECS),
        )
    }
}
