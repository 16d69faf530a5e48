//! Per-field feedback while the visitor fills in the form.

use crate::validation::{validate_field, InvalidReason, Valid};
use crate::view::ContactFormView;

/// Focus clears the field's error.
pub fn on_field_focus<V: ContactFormView + ?Sized>(view: &V, name: &str) {
    view.clear_field_error(name);
}

/// Blur re-validates the field, applying any URL correction. Unknown
/// names are ignored.
pub fn on_field_blur<V: ContactFormView + ?Sized>(view: &V, name: &str) -> Option<InvalidReason> {
    let mut field = view.fields().into_iter().find(|f| f.name == name)?;
    match validate_field(&mut field) {
        Ok(verdict) => {
            if let Valid::Corrected(value) = verdict {
                view.set_field_value(name, &value);
            }
            view.clear_field_error(name);
            None
        }
        Err(reason) => {
            view.show_field_error(name, reason);
            Some(reason)
        }
    }
}
