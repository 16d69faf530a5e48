//! Telemetry event types: named events with primitive parameter payloads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A primitive parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u8> for ParamValue {
    fn from(v: u8) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Event parameters, ordered by key for stable serialization.
pub type Params = BTreeMap<String, ParamValue>;

/// Event names emitted by the site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    CtaClick,
    ButtonClick,
    PhoneClick,
    EmailClick,
    OutboundLinkClick,
    ScrollDepth,
    PortfolioView,
    ServicePackageView,
    ContactFormSubmit,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CtaClick => "cta_click",
            Self::ButtonClick => "button_click",
            Self::PhoneClick => "phone_click",
            Self::EmailClick => "email_click",
            Self::OutboundLinkClick => "outbound_link_click",
            Self::ScrollDepth => "scroll_depth",
            Self::PortfolioView => "portfolio_view",
            Self::ServicePackageView => "service_package_view",
            Self::ContactFormSubmit => "contact_form_submit",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single telemetry data point: a name plus a parameter mapping.
///
/// Immutable once built; `with` consumes the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    name: String,
    #[serde(default)]
    parameters: Params,
}

impl TelemetryEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Params::new(),
        }
    }

    /// Builder: add or replace one parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Builder: merge a batch of parameters, later keys winning.
    pub fn with_all(mut self, params: Params) -> Self {
        self.parameters.extend(params);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Params {
        &self.parameters
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }
}

impl From<EventName> for TelemetryEvent {
    fn from(name: EventName) -> Self {
        Self::new(name.as_str())
    }
}
