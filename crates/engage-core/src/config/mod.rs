//! Configuration system for Engage.
//! TOML-based, layered resolution: env > project > user > defaults.

pub mod engage_config;
pub mod forms_config;
pub mod quote_config;
pub mod storage_config;
pub mod telemetry_config;

pub use engage_config::EngageConfig;
pub use forms_config::FormsConfig;
pub use quote_config::QuoteConfig;
pub use storage_config::StorageConfig;
pub use telemetry_config::TelemetryConfig;
