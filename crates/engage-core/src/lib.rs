//! # engage-core
//!
//! Foundation crate for the Engage site engine.
//! Defines shared types, collaborator traits, errors, config, tracing,
//! and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod surface;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::EngageConfig;
pub use errors::EngageErrorCode;
pub use surface::{ElementId, EventKind, HandlerRegistry, Surface, UiEvent};
pub use types::{EventName, ParamValue, Params, TelemetryEvent};
