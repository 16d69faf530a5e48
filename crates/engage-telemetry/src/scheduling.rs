//! Rate limiting for scroll-driven work.
//!
//! Time is passed in explicitly so hosts drive these from their own clock.

use std::time::{Duration, Instant};

/// Coalesces a burst of samples into one, delivered after `window` of quiet.
/// Only the latest sample of a burst survives.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Record a sample, restarting the quiet window.
    pub fn push(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.window, value));
    }

    /// Take the pending sample if its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now >= deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// At most one repaint-coupled job per animation frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    ticking: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame. Returns false if one is already scheduled.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Called when the frame fires. Returns whether a job was scheduled.
    pub fn run_frame(&mut self) -> bool {
        std::mem::take(&mut self.ticking)
    }
}
