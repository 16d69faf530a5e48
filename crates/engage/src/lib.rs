//! # engage
//!
//! Page runtime for the marketing site. Builds every component from an
//! [`EngageConfig`](engage_core::EngageConfig), activates each one only when
//! the page carries its hooks, and routes input events to them through a
//! [`HandlerRegistry`](engage_core::HandlerRegistry).

pub mod effects;
pub mod hooks;
pub mod page;
pub mod runtime;
mod state;

pub use effects::PageEffect;
pub use page::{Page, PageBuilder};
pub use runtime::open;
pub use state::ScrollSample;
