//! TelemetryEmitter: guarded, best-effort event dispatch.

use std::sync::Arc;

use dashmap::DashSet;
use engage_core::traits::AnalyticsSink;
use engage_core::types::{EventName, Params, TelemetryEvent};

use crate::switch::TelemetrySwitch;

/// What happened to a single `track` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Handed to the analytics sink.
    Delivered,
    /// Dropped because the switch is suppressed.
    Suppressed,
    /// Dropped because its fire-once key was already used.
    AlreadyFired,
    /// The sink returned an error; logged and dropped.
    DeliveryFailed,
}

/// Thin dispatcher in front of the analytics sink.
///
/// Owns the page-lifetime set of already-fired keys used by every
/// fire-once producer. Keys are only ever added.
pub struct TelemetryEmitter {
    switch: Arc<TelemetrySwitch>,
    sink: Arc<dyn AnalyticsSink>,
    fired: DashSet<String>,
    page_location: String,
}

impl TelemetryEmitter {
    pub fn new(
        switch: Arc<TelemetrySwitch>,
        sink: Arc<dyn AnalyticsSink>,
        page_location: impl Into<String>,
    ) -> Self {
        Self {
            switch,
            sink,
            fired: DashSet::new(),
            page_location: page_location.into(),
        }
    }

    pub fn switch(&self) -> &Arc<TelemetrySwitch> {
        &self.switch
    }

    pub fn set_suppressed(&self, suppressed: bool) {
        self.switch.set_suppressed(suppressed);
    }

    pub fn is_suppressed(&self) -> bool {
        self.switch.is_suppressed()
    }

    /// Path of the page this emitter reports for.
    pub fn page_location(&self) -> &str {
        &self.page_location
    }

    /// Forward an event to the sink unless suppressed. Never fails.
    pub fn track(&self, event: TelemetryEvent) -> TrackOutcome {
        if self.switch.is_suppressed() {
            tracing::trace!(event = event.name(), "telemetry: suppressed");
            return TrackOutcome::Suppressed;
        }
        match self.sink.send(&event) {
            Ok(()) => {
                tracing::debug!(event = event.name(), "telemetry: delivered");
                TrackOutcome::Delivered
            }
            Err(e) => {
                tracing::warn!(event = event.name(), "telemetry: delivery failed: {e}");
                TrackOutcome::DeliveryFailed
            }
        }
    }

    /// Track an event at most once per `key` for the emitter's lifetime.
    ///
    /// The key is claimed even when the send is suppressed, so accepting
    /// consent later never replays an earlier crossing.
    pub fn track_once(&self, key: &str, event: TelemetryEvent) -> TrackOutcome {
        if !self.fired.insert(key.to_string()) {
            return TrackOutcome::AlreadyFired;
        }
        self.track(event)
    }

    pub fn has_fired(&self, key: &str) -> bool {
        self.fired.contains(key)
    }

    /// Snapshot of the fired keys, sorted.
    pub fn fired_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.fired.iter().map(|k| k.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Emit `contact_form_submit` for a successful submission.
    pub fn track_form_submission(&self, form_id: &str, metadata: Params) -> TrackOutcome {
        let event = TelemetryEvent::from(EventName::ContactFormSubmit)
            .with("form_id", form_id)
            .with("page_location", self.page_location.as_str())
            .with_all(metadata);
        self.track(event)
    }
}

impl std::fmt::Debug for TelemetryEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryEmitter")
            .field("switch", &self.switch)
            .field("fired", &self.fired.len())
            .field("page_location", &self.page_location)
            .finish()
    }
}
