//! Contact form prefill from the page query string.
//!
//! Two link shapes reach the contact page: `?package=starter` from the
//! service cards and `?founding=true&quote=starter&price=699` from the
//! quote calculator. Both name a package by slug; only the slug drives the
//! prefill.

use engage_quote::Tier;

use crate::view::ContactFormView;

pub const BUDGET_FIELD: &str = "budget";
pub const MESSAGE_FIELD: &str = "message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPrefill {
    /// Package slug as it appeared in the link.
    pub package: String,
    /// Budget range to pre-select, for known packages.
    pub budget: Option<&'static str>,
}

/// Budget option matching a tier.
pub fn budget_range(tier: Tier) -> &'static str {
    match tier {
        Tier::Starter => "2000-3000",
        Tier::Professional => "3000-5000",
        Tier::Premium => "5000+",
    }
}

impl ContactPrefill {
    /// Read the prefill from a query string (without the leading `?`).
    /// `package` takes precedence over `quote`.
    pub fn from_query(query: &str) -> Option<Self> {
        let mut package = None;
        let mut quote = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "package" if !value.is_empty() => package = Some(value.into_owned()),
                "quote" if !value.is_empty() => quote = Some(value.into_owned()),
                _ => {}
            }
        }

        let package = package.or(quote)?;
        let budget = Tier::from_slug(&package).map(budget_range);
        Some(Self { package, budget })
    }

    /// Full package name for the message; unknown slugs are used verbatim.
    pub fn package_name(&self) -> String {
        Tier::from_slug(&self.package)
            .map(|t| t.name().to_string())
            .unwrap_or_else(|| self.package.clone())
    }

    pub fn message(&self) -> String {
        format!("I'm interested in the {}. ", self.package_name())
    }

    /// Pre-select the budget and, if the message is still empty, fill and
    /// focus it.
    pub fn apply<V: ContactFormView + ?Sized>(&self, view: &V) {
        let fields = view.fields();
        if let Some(budget) = self.budget {
            if fields.iter().any(|f| f.name == BUDGET_FIELD) {
                view.set_field_value(BUDGET_FIELD, budget);
            }
        }
        let message_empty = fields
            .iter()
            .find(|f| f.name == MESSAGE_FIELD)
            .is_some_and(|f| f.value.is_empty());
        if message_empty {
            view.set_field_value(MESSAGE_FIELD, &self.message());
            view.focus_field(MESSAGE_FIELD);
        }
        tracing::debug!(package = %self.package, "forms: prefilled from link");
    }
}
