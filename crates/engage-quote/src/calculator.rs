//! Quote calculator input validation.

use engage_core::errors::QuoteError;

use crate::pricing::QuoteRequest;
use crate::tier::{AddOn, Tier};

pub const BUSINESS_TYPE_FIELD: &str = "business-type";
pub const PAGE_COUNT_FIELD: &str = "page-count";

/// Raw values read from the calculator form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorInput {
    pub business_type: Option<String>,
    pub page_count: Option<String>,
    pub ecommerce: bool,
    pub bilingual: bool,
}

/// A calculator field that needs the visitor's attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
    /// Sentence used in the combined screen-reader announcement.
    pub summary: &'static str,
}

/// Why the calculator could not produce a quote.
#[derive(Debug)]
pub enum CalculatorRejection {
    /// Required selections are missing. Shown to the visitor.
    Incomplete(Vec<FieldError>),
    /// The page's select offered a value outside the tier table.
    Misconfigured(QuoteError),
}

impl CalculatorRejection {
    /// Assertive announcement listing every missing selection.
    pub fn announcement(&self) -> Option<String> {
        match self {
            Self::Incomplete(errors) => {
                let detail: Vec<&str> = errors.iter().map(|e| e.summary).collect();
                Some(format!("Form has errors. {}", detail.join(" ")))
            }
            Self::Misconfigured(_) => None,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl CalculatorInput {
    /// Check both required selections, reporting all that are missing, then
    /// build the pricing request.
    pub fn validate(&self) -> Result<QuoteRequest, CalculatorRejection> {
        let mut errors = Vec::new();
        if is_blank(&self.business_type) {
            errors.push(FieldError {
                field: BUSINESS_TYPE_FIELD,
                message: "Please select your business type",
                summary: "Please select your business type.",
            });
        }
        if is_blank(&self.page_count) {
            errors.push(FieldError {
                field: PAGE_COUNT_FIELD,
                message: "Please select the number of pages",
                summary: "Please select the number of pages you need.",
            });
        }
        if !errors.is_empty() {
            return Err(CalculatorRejection::Incomplete(errors));
        }

        let tier: Tier = self
            .page_count
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(CalculatorRejection::Misconfigured)?;

        let mut request = QuoteRequest::new(tier);
        if self.ecommerce {
            request = request.with_add_on(AddOn::Ecommerce);
        }
        if self.bilingual {
            request = request.with_add_on(AddOn::Bilingual);
        }
        Ok(request)
    }
}
