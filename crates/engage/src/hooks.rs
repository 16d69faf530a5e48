//! Element ids and classes the runtime looks for on the page.

pub const CONSENT_ACCEPT_ID: &str = "ga-accept";
pub const CONSENT_DECLINE_ID: &str = "ga-decline";

pub const DISPLAY_MODE_TOGGLE_CLASS: &str = "dark-mode-toggle";
pub const HERO_BACKGROUND_CLASS: &str = "hero-gradient-bg";

pub const PRICING_CARD_CLASS: &str = "pricing-card";
pub const PRICING_TITLE_SELECTOR: &str = ".pricing-title";

pub const PORTFOLIO_ITEM_CLASS: &str = "portfolio-item";
pub const PORTFOLIO_TITLE_SELECTOR: &str = "h3";
