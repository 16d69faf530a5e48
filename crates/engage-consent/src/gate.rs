//! ConsentGate: decides whether telemetry may fire and persists the choice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use engage_core::constants::CONSENT_KEY;
use engage_core::traits::PreferenceStore;
use engage_telemetry::TelemetryEmitter;

/// Persisted consent state. `Unset` until the visitor chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Unset,
    Accepted,
    Declined,
}

impl ConsentState {
    /// Interpret a stored flag. Absence means `Unset`; any stored value
    /// other than `declined` means the visitor already answered and did
    /// not refuse.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None => Self::Unset,
            Some("declined") => Self::Declined,
            Some("accepted") => Self::Accepted,
            Some(other) => {
                tracing::warn!(value = other, "consent: unrecognised stored value, treating as accepted");
                Self::Accepted
            }
        }
    }
}

/// A choice the visitor can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Accepted,
    Declined,
}

impl ConsentChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl From<ConsentChoice> for ConsentState {
    fn from(choice: ConsentChoice) -> Self {
        match choice {
            ConsentChoice::Accepted => Self::Accepted,
            ConsentChoice::Declined => Self::Declined,
        }
    }
}

/// Gate between the visitor's consent and the telemetry emitter.
///
/// Only an explicit `Declined` suppresses telemetry. If storage cannot be
/// read the gate assumes acceptance for this load and never prompts.
pub struct ConsentGate {
    store: Arc<dyn PreferenceStore>,
    emitter: Arc<TelemetryEmitter>,
    state: Mutex<ConsentState>,
    storage_available: bool,
    prompted: AtomicBool,
}

impl ConsentGate {
    /// Read the persisted flag and apply it to the emitter.
    pub fn load(store: Arc<dyn PreferenceStore>, emitter: Arc<TelemetryEmitter>) -> Self {
        let (state, storage_available) = match store.get(CONSENT_KEY) {
            Ok(value) => (ConsentState::from_stored(value.as_deref()), true),
            Err(e) => {
                tracing::warn!("consent: storage unavailable, assuming accepted for this load: {e}");
                (ConsentState::Unset, false)
            }
        };
        emitter.set_suppressed(state == ConsentState::Declined);
        tracing::debug!(?state, storage_available, "consent: loaded");

        Self {
            store,
            emitter,
            state: Mutex::new(state),
            storage_available,
            prompted: AtomicBool::new(false),
        }
    }

    /// Current consent state.
    pub fn consent(&self) -> ConsentState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether telemetry may fire: anything short of an explicit decline.
    pub fn tracking_allowed(&self) -> bool {
        self.consent() != ConsentState::Declined
    }

    pub fn storage_available(&self) -> bool {
        self.storage_available
    }

    /// Whether to show the accept/decline surface now. True at most once
    /// per gate, and only while no choice exists.
    pub fn take_prompt(&self) -> bool {
        if !self.storage_available || self.consent() != ConsentState::Unset {
            return false;
        }
        !self.prompted.swap(true, Ordering::SeqCst)
    }

    /// Persist a choice and apply it to the emitter. Idempotent.
    ///
    /// Accepting re-enables tracking from this point on; nothing that was
    /// suppressed earlier is replayed.
    pub fn record(&self, choice: ConsentChoice) {
        if let Err(e) = self.store.set(CONSENT_KEY, choice.as_str()) {
            tracing::warn!(choice = choice.as_str(), "consent: failed to persist choice: {e}");
        }
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = choice.into();
        self.emitter
            .set_suppressed(choice == ConsentChoice::Declined);
        tracing::info!(choice = choice.as_str(), "consent: recorded");
    }
}
