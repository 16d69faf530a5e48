//! Collaborator traits. Each external dependency of the engine sits behind
//! one of these so hosts can bind their own implementations.

pub mod analytics;
pub mod form_transport;
pub mod preference_store;

pub use analytics::AnalyticsSink;
pub use form_transport::{FormTransport, TransportResponse};
pub use preference_store::PreferenceStore;
