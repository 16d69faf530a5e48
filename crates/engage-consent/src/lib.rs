//! # engage-consent
//!
//! Decides whether telemetry may fire and persists the visitor's choices.
//!
//! Tracking is on by default and stays on until the visitor explicitly
//! declines. Storage failures never block the page: the gate fails open.

pub mod display_mode;
pub mod gate;
pub mod store;

pub use display_mode::{DisplayMode, DisplayModePreference};
pub use gate::{ConsentChoice, ConsentGate, ConsentState};
pub use store::{JsonFilePreferenceStore, MemoryPreferenceStore};
