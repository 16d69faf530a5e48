//! Submission pipeline: Idle → InFlight → {Succeeded, Failed} → Idle.
//!
//! One network attempt per entry into InFlight. Retrying is the visitor
//! submitting again; the pipeline never retries on its own.

use std::sync::{Arc, Mutex, PoisonError};

use engage_core::config::FormsConfig;
use engage_core::constants::NOT_SPECIFIED;
use engage_core::errors::SubmissionError;
use engage_core::traits::FormTransport;
use engage_core::types::{ParamValue, Params};
use engage_telemetry::TelemetryEmitter;

use crate::field::FormField;
use crate::validation::{validate_form, FormReport};
use crate::view::ContactFormView;

/// Form fields reported with `contact_form_submit`, as (param, field name).
const SUBMISSION_METADATA: &[(&str, &str)] = &[
    ("business_type", "business-type"),
    ("budget", "budget"),
    ("referral_source", "referral"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// A submission was already in flight; nothing happened.
    Busy,
    /// Required fields failed validation; no network I/O was attempted.
    Invalid(FormReport),
    Succeeded,
    Failed(SubmissionError),
}

pub struct SubmissionPipeline<T> {
    transport: T,
    emitter: Arc<TelemetryEmitter>,
    endpoint: Option<String>,
    form_id: String,
    pending_label: String,
    state: Mutex<SubmissionState>,
}

impl<T: FormTransport> SubmissionPipeline<T> {
    pub fn new(transport: T, emitter: Arc<TelemetryEmitter>, config: &FormsConfig) -> Self {
        Self {
            transport,
            emitter,
            endpoint: config.endpoint.clone(),
            form_id: config.effective_form_id(),
            pending_label: config.effective_pending_label(),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock_state()
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one submission of the form behind `view`.
    pub async fn submit<V: ContactFormView + ?Sized>(&self, view: &V) -> SubmissionOutcome {
        let fields = match self.begin(view) {
            Ok(fields) => fields,
            Err(outcome) => return outcome,
        };

        let _restore = ControlRestore {
            view,
            label: view.submit_label(),
            state: &self.state,
        };
        view.set_submit_enabled(false);
        view.set_submit_label(&self.pending_label);

        match self.send(&fields).await {
            Ok(()) => {
                view.reset();
                view.set_success_visible(true);
                view.set_error_visible(false);
                self.emitter
                    .track_form_submission(&self.form_id, submission_metadata(&fields));
                *self.lock_state() = SubmissionState::Succeeded;
                tracing::info!(form_id = %self.form_id, "forms: submission succeeded");
                SubmissionOutcome::Succeeded
            }
            Err(e) => {
                view.set_error_visible(true);
                view.set_success_visible(false);
                *self.lock_state() = SubmissionState::Failed;
                tracing::warn!(form_id = %self.form_id, "forms: submission failed: {e}");
                SubmissionOutcome::Failed(e)
            }
        }
    }

    /// Entry guard. Validates and moves to InFlight in one step, so a
    /// second caller observes InFlight before any network I/O starts.
    fn begin<V: ContactFormView + ?Sized>(
        &self,
        view: &V,
    ) -> Result<Vec<FormField>, SubmissionOutcome> {
        let mut state = self.lock_state();
        if *state == SubmissionState::InFlight {
            tracing::debug!("forms: submit ignored, already in flight");
            return Err(SubmissionOutcome::Busy);
        }

        view.set_success_visible(false);
        view.set_error_visible(false);

        let mut fields = view.fields();
        let report = validate_form(&mut fields);
        for (name, value) in report.corrections() {
            view.set_field_value(name, value);
        }
        if !report.is_valid() {
            for (name, verdict) in report.verdicts() {
                match verdict {
                    Ok(_) => view.clear_field_error(name),
                    Err(reason) => view.show_field_error(name, *reason),
                }
            }
            if let Some(first) = report.first_invalid() {
                view.focus_field(first);
            }
            *state = SubmissionState::Idle;
            return Err(SubmissionOutcome::Invalid(report));
        }

        *state = SubmissionState::InFlight;
        tracing::debug!("forms: submission in flight");
        Ok(fields)
    }

    async fn send(&self, fields: &[FormField]) -> Result<(), SubmissionError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(SubmissionError::EndpointMissing)?;
        let payload: Vec<(String, String)> = fields
            .iter()
            .filter(|f| f.is_submitted())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();

        let response = self.transport.post_form(endpoint, &payload).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(SubmissionError::Rejected {
                status: response.status,
            })
        }
    }
}

/// Metadata for `contact_form_submit`. Absent or empty fields report the
/// `not specified` sentinel.
pub fn submission_metadata(fields: &[FormField]) -> Params {
    SUBMISSION_METADATA
        .iter()
        .map(|(param, field)| {
            let value = fields
                .iter()
                .find(|f| f.name == *field)
                .map(|f| f.value.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(NOT_SPECIFIED);
            (param.to_string(), ParamValue::from(value))
        })
        .collect()
}

/// Re-enables the submit control and restores its label when the attempt
/// ends, including when the submit future is dropped mid-flight.
struct ControlRestore<'a, V: ContactFormView + ?Sized> {
    view: &'a V,
    label: String,
    state: &'a Mutex<SubmissionState>,
}

impl<V: ContactFormView + ?Sized> Drop for ControlRestore<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_enabled(true);
        self.view.set_submit_label(&self.label);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == SubmissionState::InFlight {
            *state = SubmissionState::Idle;
        }
    }
}
