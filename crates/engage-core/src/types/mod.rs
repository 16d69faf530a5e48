//! Shared value types.

pub mod event;

pub use event::{EventName, ParamValue, Params, TelemetryEvent};
