//! # engage-telemetry
//!
//! Best-effort telemetry for the site.
//!
//! ## Components
//! - **switch**: process-wide suppression flag keyed by collector id
//! - **emitter**: guarded dispatch plus the set of already-fired keys
//! - **threshold**: scroll-depth tracker, fires each threshold once
//! - **visibility**: per-target view tracker, fires each target once
//! - **interactions**: click classifiers (CTA, buttons, phone, email, outbound, portfolio)
//! - **scheduling**: scroll debouncing and per-frame coalescing

pub mod emitter;
pub mod interactions;
pub mod scheduling;
pub mod switch;
pub mod threshold;
pub mod visibility;

pub use emitter::{TelemetryEmitter, TrackOutcome};
pub use interactions::{ClickContext, LinkTarget};
pub use scheduling::{Debouncer, FrameScheduler};
pub use switch::TelemetrySwitch;
pub use threshold::{percent_scrolled, ThresholdTracker};
pub use visibility::VisibilityTracker;
