//! Interactive surface abstraction.
//!
//! The hosting page is reached only through the `Surface` query trait and
//! through `UiEvent`s routed by a `HandlerRegistry`. Nothing in the engine
//! depends on a concrete UI binding.

pub mod element;
pub mod registry;

pub use element::{ElementId, EventKind, Surface, UiEvent};
pub use registry::{Binding, Handler, HandlerRegistry};
