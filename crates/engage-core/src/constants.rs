/// Placeholder analytics collector identifier.
pub const DEFAULT_COLLECTOR_ID: &str = "G-XXXXXXXXXX";

/// Scroll-depth thresholds, in percent.
pub const DEFAULT_SCROLL_THRESHOLDS: [u8; 4] = [25, 50, 75, 100];

/// Quiescence window for scroll-depth evaluation.
pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 500;

/// Visible fraction at which a watched target counts as viewed.
pub const DEFAULT_VISIBILITY_RATIO: f64 = 0.5;

/// Identifier reported with `contact_form_submit`.
pub const DEFAULT_FORM_ID: &str = "contact-form";

/// Label shown on the submit control while a submission is in flight.
pub const DEFAULT_PENDING_LABEL: &str = "Sending...";

/// Network timeout for the form submission attempt.
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

/// Path of the contact page the quote hand-off link targets.
pub const DEFAULT_CONTACT_PATH: &str = "/contact.html";

/// Sentinel for metadata the visitor did not supply.
pub const NOT_SPECIFIED: &str = "not specified";

/// Preference key holding the consent choice.
pub const CONSENT_KEY: &str = "ga_consent";

/// Preference key holding the display-mode choice.
pub const DISPLAY_MODE_KEY: &str = "darkMode";

/// Promotional multiplier applied to quote totals (30% off).
pub const FOUNDING_DISCOUNT_FACTOR: f64 = 0.7;

/// Parallax speed for the hero background, relative to scroll offset.
pub const PARALLAX_SPEED: f64 = 0.5;
