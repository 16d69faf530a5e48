//! Quote hand-off configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuoteConfig {
    /// Contact page path the quote's call-to-action links to.
    pub contact_path: Option<String>,
}

impl QuoteConfig {
    pub fn effective_contact_path(&self) -> String {
        self.contact_path
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_CONTACT_PATH.to_string())
    }
}
