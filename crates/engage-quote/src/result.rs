//! Quote result state: Hidden until a quote is computed, then Shown until
//! the visitor dismisses it.

use engage_core::config::QuoteConfig;
use engage_core::surface::{ElementId, Surface};

use crate::calculator::{CalculatorInput, CalculatorRejection};
use crate::format::format_price;
use crate::pricing::{price, QuotePackage};

pub const QUOTE_FORM_ID: &str = "quote-form";
pub const QUOTE_RESULT_ID: &str = "quote-result";
pub const CLOSE_CONTROL_CLASS: &str = "result-close";

const CLOSED_ANNOUNCEMENT: &str = "Quote closed. Returning to calculator.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteVisibility {
    #[default]
    Hidden,
    Shown,
}

/// Live-region politeness for screen-reader announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    Polite,
    Assertive,
}

/// Everything the result surface displays, rendered in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDisplay {
    pub name: String,
    pub price: String,
    pub founding_price: String,
    pub features: Vec<String>,
    pub handoff_link: String,
}

impl QuoteDisplay {
    pub fn from_package(package: &QuotePackage, contact_path: &str) -> Self {
        Self {
            name: package.name.clone(),
            price: format_price(package.total_price),
            founding_price: format_price(package.discounted_price),
            features: package.features.clone(),
            handoff_link: package.handoff_link(contact_path),
        }
    }
}

/// The quote result surface and the calculator form it belongs to.
pub trait QuoteView {
    /// Replace every derived display field at once.
    fn render(&mut self, display: &QuoteDisplay);

    fn set_shown(&mut self, shown: bool);

    fn announce(&mut self, message: &str, priority: Announcement);

    /// Focus the calculator's submit control.
    fn focus_submit(&mut self);

    /// Focus the result heading.
    fn focus_result(&mut self);

    fn show_field_error(&mut self, field: &str, message: &str);

    fn clear_field_errors(&mut self);
}

#[derive(Debug)]
pub struct QuoteResultController {
    result: ElementId,
    form: ElementId,
    contact_path: String,
    visibility: QuoteVisibility,
    current: Option<QuotePackage>,
}

impl QuoteResultController {
    pub fn new(result: ElementId, form: ElementId, contact_path: impl Into<String>) -> Self {
        Self {
            result,
            form,
            contact_path: contact_path.into(),
            visibility: QuoteVisibility::Hidden,
            current: None,
        }
    }

    pub fn from_config(config: &QuoteConfig) -> Self {
        Self::new(
            ElementId::from(QUOTE_RESULT_ID),
            ElementId::from(QUOTE_FORM_ID),
            config.effective_contact_path(),
        )
    }

    pub fn result_id(&self) -> &ElementId {
        &self.result
    }

    pub fn form_id(&self) -> &ElementId {
        &self.form
    }

    pub fn visibility(&self) -> QuoteVisibility {
        self.visibility
    }

    /// The quote currently on display, if any.
    pub fn current(&self) -> Option<&QuotePackage> {
        match self.visibility {
            QuoteVisibility::Shown => self.current.as_ref(),
            QuoteVisibility::Hidden => None,
        }
    }

    /// Handle a calculator submission. Invalid input surfaces field errors
    /// and leaves the state unchanged.
    pub fn calculate<V: QuoteView + ?Sized>(
        &mut self,
        view: &mut V,
        input: &CalculatorInput,
    ) -> Option<&QuotePackage> {
        view.clear_field_errors();
        match input.validate() {
            Ok(request) => {
                self.show(view, price(&request));
                self.current.as_ref()
            }
            Err(rejection) => {
                if let Some(message) = rejection.announcement() {
                    view.announce(&message, Announcement::Assertive);
                }
                match rejection {
                    CalculatorRejection::Incomplete(errors) => {
                        for error in &errors {
                            view.show_field_error(error.field, error.message);
                        }
                    }
                    CalculatorRejection::Misconfigured(e) => {
                        tracing::warn!("quote: calculator misconfigured: {e}");
                    }
                }
                None
            }
        }
    }

    /// Enter (or stay in) Shown with `package`.
    pub fn show<V: QuoteView + ?Sized>(&mut self, view: &mut V, package: QuotePackage) {
        let display = QuoteDisplay::from_package(&package, &self.contact_path);
        view.render(&display);
        view.set_shown(true);
        view.announce(
            &format!(
                "Quote calculated. {} for {} dollars with {} features included.",
                package.name,
                package.discounted_price,
                package.features.len()
            ),
            Announcement::Polite,
        );
        view.focus_result();

        tracing::debug!(
            tier = ?package.tier,
            total = package.total_price,
            "quote: shown"
        );
        self.current = Some(package);
        self.visibility = QuoteVisibility::Shown;
    }

    /// Close control or escape: hide, announce, and return focus to the
    /// calculator. No-op while hidden.
    pub fn dismiss<V: QuoteView + ?Sized>(&mut self, view: &mut V) -> bool {
        if !self.hide(view) {
            return false;
        }
        view.announce(CLOSED_ANNOUNCEMENT, Announcement::Polite);
        view.focus_submit();
        true
    }

    pub fn on_key<V: QuoteView + ?Sized>(&mut self, view: &mut V, key: &str) -> bool {
        key == "Escape" && self.dismiss(view)
    }

    /// Route a click anywhere on the page: the close control dismisses,
    /// anything outside both the result and the form hides silently.
    pub fn on_click<V, S>(&mut self, view: &mut V, surface: &S, target: &ElementId) -> bool
    where
        V: QuoteView + ?Sized,
        S: Surface + ?Sized,
    {
        if self.visibility == QuoteVisibility::Hidden {
            return false;
        }
        let in_result = surface.contains(&self.result, target);
        let on_close_control = in_result
            && surface
                .closest(target, &|id| surface.has_class(id, CLOSE_CONTROL_CLASS))
                .is_some_and(|control| surface.contains(&self.result, &control));
        if on_close_control {
            return self.dismiss(view);
        }
        if !in_result && !surface.contains(&self.form, target) {
            return self.hide(view);
        }
        false
    }

    fn hide<V: QuoteView + ?Sized>(&mut self, view: &mut V) -> bool {
        if self.visibility == QuoteVisibility::Hidden {
            return false;
        }
        view.set_shown(false);
        self.visibility = QuoteVisibility::Hidden;
        tracing::debug!("quote: hidden");
        true
    }
}
