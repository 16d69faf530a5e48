//! The contact form as seen by the pipeline.

use crate::field::FormField;
use crate::validation::InvalidReason;

/// Contact form surface. Methods take `&self`: the pipeline keeps the view
/// borrowed across the network await while other events still reach it.
pub trait ContactFormView: Send + Sync {
    /// Snapshot of every field, in document order.
    fn fields(&self) -> Vec<FormField>;

    fn set_field_value(&self, name: &str, value: &str);

    fn show_field_error(&self, name: &str, reason: InvalidReason);

    fn clear_field_error(&self, name: &str);

    /// Move focus (and scroll) to the field.
    fn focus_field(&self, name: &str);

    fn submit_label(&self) -> String;

    fn set_submit_label(&self, label: &str);

    fn set_submit_enabled(&self, enabled: bool);

    fn set_success_visible(&self, visible: bool);

    fn set_error_visible(&self, visible: bool);

    /// Clear every field back to its initial value.
    fn reset(&self);
}
