//! Side effects the host page applies after an event is handled.

use engage_consent::DisplayMode;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    ShowConsentPrompt,
    HideConsentPrompt,
    ApplyDisplayMode(DisplayMode),
    /// Polite screen-reader announcement.
    Announce(String),
    /// Vertical translation for the hero background, in pixels.
    ParallaxOffset(f64),
}
