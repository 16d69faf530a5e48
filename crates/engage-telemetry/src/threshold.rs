//! Scroll-depth threshold tracker.

use std::sync::Arc;

use engage_core::types::{EventName, TelemetryEvent};

use crate::emitter::{TelemetryEmitter, TrackOutcome};

/// Percent of the scrollable height already scrolled, rounded.
///
/// `None` when the page does not scroll (scrollable height is zero or
/// negative) or the inputs are not finite.
pub fn percent_scrolled(offset: f64, scroll_height: f64, viewport_height: f64) -> Option<i64> {
    let scrollable = scroll_height - viewport_height;
    if !(scrollable > 0.0) || !offset.is_finite() {
        return None;
    }
    Some((offset / scrollable * 100.0).round() as i64)
}

/// Fires `scroll_depth` once per configured threshold, the first time the
/// scrolled percentage reaches it. Oscillating across a threshold never
/// fires it again.
#[derive(Debug)]
pub struct ThresholdTracker {
    thresholds: Vec<u8>,
    emitter: Arc<TelemetryEmitter>,
}

impl ThresholdTracker {
    pub fn new(mut thresholds: Vec<u8>, emitter: Arc<TelemetryEmitter>) -> Self {
        thresholds.sort_unstable();
        thresholds.dedup();
        Self {
            thresholds,
            emitter,
        }
    }

    pub fn thresholds(&self) -> &[u8] {
        &self.thresholds
    }

    /// Evaluate one scroll sample. Returns the thresholds crossed for the
    /// first time by this sample.
    pub fn observe_scroll(&self, offset: f64, scroll_height: f64, viewport_height: f64) -> Vec<u8> {
        match percent_scrolled(offset, scroll_height, viewport_height) {
            Some(percent) => self.observe_percent(percent),
            None => Vec::new(),
        }
    }

    pub fn observe_percent(&self, percent: i64) -> Vec<u8> {
        let mut newly = Vec::new();
        for &threshold in &self.thresholds {
            if percent < i64::from(threshold) {
                continue;
            }
            let event = TelemetryEvent::from(EventName::ScrollDepth)
                .with("percent_scrolled", threshold)
                .with("page_location", self.emitter.page_location());
            if self.emitter.track_once(&Self::key(threshold), event) != TrackOutcome::AlreadyFired {
                newly.push(threshold);
            }
        }
        newly
    }

    /// Thresholds already crossed this page lifetime.
    pub fn crossed(&self) -> Vec<u8> {
        self.thresholds
            .iter()
            .copied()
            .filter(|t| self.emitter.has_fired(&Self::key(*t)))
            .collect()
    }

    fn key(threshold: u8) -> String {
        format!("{}:{threshold}", EventName::ScrollDepth)
    }
}
