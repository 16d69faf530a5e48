//! # engage-quote
//!
//! Instant quote calculator: a pure pricing function over a closed tier
//! table, validation of the calculator inputs, and the Hidden/Shown state of
//! the quote result surface.

pub mod calculator;
pub mod format;
pub mod pricing;
pub mod result;
pub mod tier;

pub use calculator::{CalculatorInput, CalculatorRejection, FieldError};
pub use format::{format_price, package_slug};
pub use pricing::{price, QuotePackage, QuoteRequest};
pub use result::{Announcement, QuoteDisplay, QuoteResultController, QuoteView, QuoteVisibility};
pub use tier::{AddOn, Tier};
