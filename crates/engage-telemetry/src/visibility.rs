//! Visibility tracker: fires once per watched target when it is first seen.

use std::collections::HashMap;
use std::sync::Arc;

use engage_core::surface::ElementId;
use engage_core::types::{EventName, TelemetryEvent};

use crate::emitter::{TelemetryEmitter, TrackOutcome};

/// Label used when a watched target has no readable title.
pub const UNKNOWN_PACKAGE: &str = "Unknown Package";

/// Observes a set of targets. The first time a target's visible fraction
/// reaches `ratio`, one event fires for it; later crossings are ignored.
/// Targets are independent of each other.
#[derive(Debug)]
pub struct VisibilityTracker {
    event: EventName,
    label_param: &'static str,
    ratio: f64,
    emitter: Arc<TelemetryEmitter>,
    targets: HashMap<ElementId, String>,
}

impl VisibilityTracker {
    pub fn new(
        event: EventName,
        label_param: &'static str,
        ratio: f64,
        emitter: Arc<TelemetryEmitter>,
    ) -> Self {
        Self {
            event,
            label_param,
            ratio,
            emitter,
            targets: HashMap::new(),
        }
    }

    /// Pricing-card views: `service_package_view` with `package_name`.
    pub fn service_packages(ratio: f64, emitter: Arc<TelemetryEmitter>) -> Self {
        Self::new(EventName::ServicePackageView, "package_name", ratio, emitter)
    }

    /// Start watching a target. A missing label falls back to `Unknown Package`.
    pub fn watch(&mut self, target: ElementId, label: Option<String>) {
        let label = label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| UNKNOWN_PACKAGE.to_string());
        self.targets.insert(target, label);
    }

    pub fn watched(&self) -> usize {
        self.targets.len()
    }

    /// Report a visibility change. Returns true if this call fired the
    /// target's event for the first time.
    pub fn on_visibility(&self, target: &ElementId, visible_ratio: f64) -> bool {
        let Some(label) = self.targets.get(target) else {
            return false;
        };
        if !(visible_ratio >= self.ratio) {
            return false;
        }
        let event = TelemetryEvent::from(self.event)
            .with(self.label_param, label.as_str())
            .with("page_location", self.emitter.page_location());
        self.emitter.track_once(&self.key(target), event) != TrackOutcome::AlreadyFired
    }

    pub fn is_tracked(&self, target: &ElementId) -> bool {
        self.emitter.has_fired(&self.key(target))
    }

    fn key(&self, target: &ElementId) -> String {
        format!("{}:{target}", self.event)
    }
}
