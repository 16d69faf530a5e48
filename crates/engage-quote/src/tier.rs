//! Tier and add-on tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use engage_core::errors::QuoteError;

/// Pricing bracket, keyed by the page count the visitor selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Starter,
    Professional,
    Premium,
}

const STARTER_FEATURES: &[&str] = &[
    "Professional 5-page website",
    "Mobile responsive design",
    "Contact form integration",
    "Basic SEO optimization",
    "SSL certificate & hosting (6 months)",
    "Google Analytics setup",
    "2-3 week delivery",
    "2 rounds of revisions",
];

const PROFESSIONAL_FEATURES: &[&str] = &[
    "Everything in Starter Package",
    "Custom brand-focused design",
    "Easy admin panel (CMS)",
    "Advanced form capabilities",
    "Google Maps integration",
    "Social media integration",
    "Blog setup (optional)",
    "1 year hosting included",
    "3 rounds of revisions",
];

const PREMIUM_FEATURES: &[&str] = &[
    "Everything in Professional Package",
    "Advanced features (booking, scheduling)",
    "Blog setup with full CMS",
    "Custom integrations (APIs)",
    "Content migration from existing site",
    "Email marketing integration",
    "Search functionality",
    "1-hour training session",
    "Priority support",
    "Unlimited revisions during development",
];

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Starter, Tier::Professional, Tier::Premium];

    pub fn page_count(&self) -> u8 {
        match self {
            Self::Starter => 5,
            Self::Professional => 8,
            Self::Premium => 12,
        }
    }

    pub fn from_page_count(pages: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.page_count() == pages)
    }

    pub fn base_price(&self) -> u32 {
        match self {
            Self::Starter => 999,
            Self::Professional => 1999,
            Self::Premium => 2999,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Starter => "Starter Package",
            Self::Professional => "Professional Package",
            Self::Premium => "Premium Package",
        }
    }

    /// Short identifier used in hand-off links (`starter`, `professional`, `premium`).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Premium => "premium",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }

    /// Fixed feature list. Each tier's list opens by including the tier below.
    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Starter => STARTER_FEATURES,
            Self::Professional => PROFESSIONAL_FEATURES,
            Self::Premium => PREMIUM_FEATURES,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the raw page-count value from the calculator.
impl FromStr for Tier {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_page_count)
            .ok_or_else(|| QuoteError::UnknownTier {
                value: s.to_string(),
            })
    }
}

/// Optional feature toggle. Declaration order is the order feature lines
/// are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddOn {
    Ecommerce,
    Bilingual,
}

impl AddOn {
    pub fn surcharge(&self) -> u32 {
        match self {
            Self::Ecommerce => 750,
            Self::Bilingual => 400,
        }
    }

    pub fn feature_line(&self) -> &'static str {
        match self {
            Self::Ecommerce => "E-commerce integration (products, cart, payments)",
            Self::Bilingual => "Bilingual support (English & Spanish)",
        }
    }

    /// Calculator control id for this toggle.
    pub fn control_id(&self) -> &'static str {
        match self {
            Self::Ecommerce => "ecommerce",
            Self::Bilingual => "bilingual",
        }
    }
}
