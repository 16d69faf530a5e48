//! Logging setup for hosts embedding Engage.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with, LogFormat};
