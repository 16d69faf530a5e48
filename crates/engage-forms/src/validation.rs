//! Validation engine.
//!
//! Rules run in precedence order and the first failing rule wins:
//! required, then the format rule for the field's kind. Failures are
//! values, never errors, so a whole form can be reported at once.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::field::{FieldKind, FormField};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

const MIN_PHONE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    EmailFormat,
    PhoneFormat,
    UrlFormat,
}

impl FieldRule {
    /// Rules that apply to `field`, in precedence order.
    pub fn for_field(field: &FormField) -> Vec<FieldRule> {
        let mut rules = Vec::with_capacity(2);
        if field.required {
            rules.push(FieldRule::Required);
        }
        match field.kind {
            FieldKind::Email => rules.push(FieldRule::EmailFormat),
            FieldKind::Tel => rules.push(FieldRule::PhoneFormat),
            FieldKind::Url => rules.push(FieldRule::UrlFormat),
            _ => {}
        }
        rules
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Required,
    InvalidEmail,
    InvalidPhone,
    InvalidUrl,
}

impl InvalidReason {
    /// Short machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidEmail => "invalid email",
            Self::InvalidPhone => "invalid phone",
            Self::InvalidUrl => "invalid url",
        }
    }

    /// Message shown next to the field.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Required => "This field is required",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::InvalidPhone => "Please enter a valid phone number",
            Self::InvalidUrl => "Please enter a valid URL",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Valid {
    AsIs,
    /// The value was rewritten in place (URL scheme added).
    Corrected(String),
}

/// Validate one field. A URL missing its scheme is corrected in place when
/// the `https://` form parses.
pub fn validate_field(field: &mut FormField) -> Result<Valid, InvalidReason> {
    let trimmed = field.value.trim().to_string();
    let mut verdict = Valid::AsIs;

    for rule in FieldRule::for_field(field) {
        match rule {
            FieldRule::Required => {
                if trimmed.is_empty() {
                    return Err(InvalidReason::Required);
                }
            }
            _ if trimmed.is_empty() => {}
            FieldRule::EmailFormat => {
                if !EMAIL_RE.is_match(&trimmed) {
                    return Err(InvalidReason::InvalidEmail);
                }
            }
            FieldRule::PhoneFormat => {
                if clean_phone(&trimmed).chars().count() < MIN_PHONE_LEN {
                    return Err(InvalidReason::InvalidPhone);
                }
            }
            FieldRule::UrlFormat => {
                if let Some(corrected) = check_url(&trimmed)? {
                    field.value = corrected.clone();
                    verdict = Valid::Corrected(corrected);
                }
            }
        }
    }
    Ok(verdict)
}

/// Strip the formatting characters people put in phone numbers.
fn clean_phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '.'))
        .collect()
}

/// `Ok(None)` if the value parses as-is, `Ok(Some(corrected))` if it parses
/// once `https://` is prefixed.
fn check_url(value: &str) -> Result<Option<String>, InvalidReason> {
    if Url::parse(value).is_ok() {
        return Ok(None);
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        return Err(InvalidReason::InvalidUrl);
    }
    let prefixed = format!("https://{value}");
    match Url::parse(&prefixed) {
        Ok(_) => Ok(Some(prefixed)),
        Err(_) => Err(InvalidReason::InvalidUrl),
    }
}

/// Outcome of validating every required field of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    verdicts: Vec<(String, Result<Valid, InvalidReason>)>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.verdicts.iter().all(|(_, v)| v.is_ok())
    }

    /// Every checked field with its verdict, in form order.
    pub fn verdicts(&self) -> &[(String, Result<Valid, InvalidReason>)] {
        &self.verdicts
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, InvalidReason)> {
        self.verdicts
            .iter()
            .filter_map(|(name, v)| v.as_ref().err().map(|r| (name.as_str(), *r)))
    }

    pub fn first_invalid(&self) -> Option<&str> {
        self.errors().next().map(|(name, _)| name)
    }

    pub fn error_for(&self, name: &str) -> Option<InvalidReason> {
        self.errors().find(|(n, _)| *n == name).map(|(_, r)| r)
    }

    /// Fields whose value was rewritten during validation.
    pub fn corrections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.verdicts.iter().filter_map(|(name, v)| match v {
            Ok(Valid::Corrected(value)) => Some((name.as_str(), value.as_str())),
            _ => None,
        })
    }
}

/// Validate every required field without stopping at the first failure.
/// Optional fields are left to per-field (blur) validation.
pub fn validate_form(fields: &mut [FormField]) -> FormReport {
    let verdicts = fields
        .iter_mut()
        .filter(|f| f.required)
        .map(|f| {
            let verdict = validate_field(f);
            (f.name.clone(), verdict)
        })
        .collect();
    FormReport { verdicts }
}
