//! Entry point for hosts: tracing, config, and preference storage.

use std::path::Path;
use std::sync::Arc;

use engage_consent::{JsonFilePreferenceStore, MemoryPreferenceStore};
use engage_core::errors::ConfigError;
use engage_core::surface::Surface;
use engage_core::traits::{AnalyticsSink, PreferenceStore};
use engage_core::EngageConfig;

use crate::page::PageBuilder;

/// Initialise tracing, load the layered config from `root`, and open the
/// preference store it names.
///
/// Without a resolvable preference path the page keeps preferences in
/// memory for this load only.
pub fn open(
    root: &Path,
    surface: Arc<dyn Surface>,
    sink: Arc<dyn AnalyticsSink>,
) -> Result<PageBuilder, ConfigError> {
    engage_core::tracing::init_tracing();
    let config = EngageConfig::load(root)?;

    let store: Arc<dyn PreferenceStore> = match config.storage.effective_preferences_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "page: preference file");
            Arc::new(JsonFilePreferenceStore::new(path))
        }
        None => {
            tracing::warn!("page: no preference path, preferences last for this load only");
            Arc::new(MemoryPreferenceStore::new())
        }
    };

    Ok(PageBuilder::new(config, surface, sink, store))
}
