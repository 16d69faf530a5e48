//! Pricing rule engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use engage_core::constants::FOUNDING_DISCOUNT_FACTOR;

use crate::format::package_slug;
use crate::tier::{AddOn, Tier};

/// A tier plus any selected add-ons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub tier: Tier,
    pub add_ons: BTreeSet<AddOn>,
}

impl QuoteRequest {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            add_ons: BTreeSet::new(),
        }
    }

    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        self.add_ons.insert(add_on);
        self
    }
}

/// A computed quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePackage {
    pub tier: Tier,
    pub name: String,
    pub base_price: u32,
    /// Add-on surcharges in the order they were applied.
    pub surcharges: Vec<(AddOn, u32)>,
    pub total_price: u32,
    /// Founding-client price, 30% off the total.
    pub discounted_price: u32,
    pub features: Vec<String>,
}

impl QuotePackage {
    pub fn slug(&self) -> String {
        package_slug(&self.name)
    }

    /// Link to the contact page carrying this quote.
    pub fn handoff_link(&self, contact_path: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("founding", "true")
            .append_pair("quote", &self.slug())
            .append_pair("price", &self.discounted_price.to_string())
            .finish();
        format!("{contact_path}?{query}")
    }
}

/// Price a request. Total over every tier and add-on combination.
pub fn price(request: &QuoteRequest) -> QuotePackage {
    let tier = request.tier;
    let base_price = tier.base_price();

    // BTreeSet iterates in declaration order: Ecommerce, then Bilingual.
    let surcharges: Vec<(AddOn, u32)> = request
        .add_ons
        .iter()
        .map(|add_on| (*add_on, add_on.surcharge()))
        .collect();
    let total_price = base_price + surcharges.iter().map(|(_, amount)| amount).sum::<u32>();
    let features = tier
        .features()
        .iter()
        .copied()
        .chain(request.add_ons.iter().map(AddOn::feature_line))
        .map(str::to_string)
        .collect();

    QuotePackage {
        tier,
        name: tier.name().to_string(),
        base_price,
        surcharges,
        total_price,
        discounted_price: discounted(total_price),
        features,
    }
}

fn discounted(total: u32) -> u32 {
    (f64::from(total) * FOUNDING_DISCOUNT_FACTOR).round() as u32
}
