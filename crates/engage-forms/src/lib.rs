//! # engage-forms
//!
//! Contact form: per-field validation, the guarded submission pipeline,
//! the reqwest-backed transport, and prefill from a quote hand-off link.

pub mod field;
pub mod live;
pub mod pipeline;
pub mod prefill;
pub mod transport;
pub mod validation;
pub mod view;

pub use field::{FieldKind, FormField};
pub use pipeline::{SubmissionOutcome, SubmissionPipeline, SubmissionState};
pub use prefill::ContactPrefill;
pub use transport::ReqwestTransport;
pub use validation::{validate_field, validate_form, FieldRule, FormReport, InvalidReason, Valid};
pub use view::ContactFormView;
