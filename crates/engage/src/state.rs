//! Handler context shared by every registered handler.

use std::sync::Arc;
use std::time::Instant;

use engage_consent::{ConsentGate, DisplayModePreference};
use engage_core::surface::Surface;
use engage_forms::ContactFormView;
use engage_quote::{QuoteResultController, QuoteView};
use engage_telemetry::{Debouncer, FrameScheduler, TelemetryEmitter, ThresholdTracker, VisibilityTracker};

use crate::effects::PageEffect;

/// One scroll position reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub offset: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

pub(crate) struct QuoteWidget {
    pub(crate) controller: QuoteResultController,
    pub(crate) view: Box<dyn QuoteView + Send>,
}

pub(crate) struct PageState {
    pub(crate) surface: Arc<dyn Surface>,
    pub(crate) emitter: Arc<TelemetryEmitter>,
    pub(crate) consent: ConsentGate,
    pub(crate) display_mode: Option<DisplayModePreference>,
    pub(crate) thresholds: ThresholdTracker,
    pub(crate) visibility: Option<VisibilityTracker>,
    pub(crate) scroll: Debouncer<ScrollSample>,
    pub(crate) frames: FrameScheduler,
    pub(crate) parallax: bool,
    pub(crate) last_offset: f64,
    pub(crate) quote: Option<QuoteWidget>,
    pub(crate) contact_view: Option<Arc<dyn ContactFormView>>,
    pub(crate) effects: Vec<PageEffect>,
    /// Time of the event being handled.
    pub(crate) now: Instant,
}

impl PageState {
    pub(crate) fn take_effects(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.effects)
    }
}
