//! Click classifiers. Turn one click on the page into the telemetry events
//! it should produce: CTA clicks, named buttons, phone, email and outbound
//! links, and portfolio items.

use engage_core::types::{EventName, TelemetryEvent};

/// Named buttons that get a labelled `button_click` in addition to any
/// generic CTA event.
pub const TRACKED_BUTTONS: &[(&str, &str)] = &[
    ("nav-cta", "Navigation CTA Click"),
    ("hero-cta-primary", "Hero Primary CTA Click"),
    ("hero-cta-secondary", "Hero Secondary CTA Click"),
    ("view-full-portfolio", "View Portfolio CTA Click"),
    ("view-all-services", "View Services CTA Click"),
    ("final-cta-contact", "Final Section Contact CTA Click"),
    ("final-cta-phone", "Final Section Phone CTA Click"),
];

/// Title used when a portfolio item has no heading.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Everything the classifiers need to know about a clicked element.
#[derive(Debug, Clone, Default)]
pub struct ClickContext {
    pub element_id: Option<String>,
    pub text: String,
    pub href: Option<String>,
    pub is_portfolio_item: bool,
    pub portfolio_title: Option<String>,
    pub page_location: String,
    pub current_host: String,
}

/// Destination of a link worth tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Phone(String),
    Email(String),
    Outbound { url: String, domain: String },
}

/// Classify an `href`. Absolute http(s) links count as outbound only when
/// their host differs from the current one.
pub fn classify_link(href: &str, current_host: &str) -> Option<LinkTarget> {
    if let Some(number) = href.strip_prefix("tel:") {
        return Some(LinkTarget::Phone(number.to_string()));
    }
    if let Some(address) = href.strip_prefix("mailto:") {
        return Some(LinkTarget::Email(address.to_string()));
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        let parsed = url::Url::parse(href).ok()?;
        let domain = parsed.host_str()?.to_string();
        if domain != current_host {
            return Some(LinkTarget::Outbound {
                url: href.to_string(),
                domain,
            });
        }
    }
    None
}

/// Whether clicks on the element produce `cta_click`.
pub fn is_cta(element_id: &str) -> bool {
    element_id.contains("cta")
}

/// Whether the element is in the named-button catalogue.
pub fn is_tracked_button(element_id: &str) -> bool {
    TRACKED_BUTTONS.iter().any(|(id, _)| *id == element_id)
}

/// `cta_click` for any element whose id mentions `cta`.
pub fn cta_click(button_id: &str, button_text: &str, page_location: &str) -> Option<TelemetryEvent> {
    if !is_cta(button_id) {
        return None;
    }
    Some(
        TelemetryEvent::from(EventName::CtaClick)
            .with("button_id", button_id)
            .with("button_text", button_text.trim())
            .with("page_location", page_location),
    )
}

/// `button_click` for the catalogue of named buttons.
pub fn button_click(button_id: &str) -> Option<TelemetryEvent> {
    let (_, label) = TRACKED_BUTTONS.iter().find(|(id, _)| *id == button_id)?;
    Some(
        TelemetryEvent::from(EventName::ButtonClick)
            .with("event_label", *label)
            .with("button_id", button_id),
    )
}

pub fn link_click(target: &LinkTarget, link_text: &str, page_location: &str) -> TelemetryEvent {
    let link_text = link_text.trim();
    match target {
        LinkTarget::Phone(number) => TelemetryEvent::from(EventName::PhoneClick)
            .with("phone_number", number.as_str())
            .with("link_text", link_text)
            .with("page_location", page_location),
        LinkTarget::Email(address) => TelemetryEvent::from(EventName::EmailClick)
            .with("email_address", address.as_str())
            .with("link_text", link_text)
            .with("page_location", page_location),
        LinkTarget::Outbound { url, domain } => TelemetryEvent::from(EventName::OutboundLinkClick)
            .with("link_url", url.as_str())
            .with("link_domain", domain.as_str())
            .with("link_text", link_text),
    }
}

pub fn portfolio_view(title: Option<&str>, page_location: &str) -> TelemetryEvent {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_PROJECT);
    TelemetryEvent::from(EventName::PortfolioView)
        .with("project_title", title)
        .with("page_location", page_location)
}

/// All events a click produces, in a stable order: CTA, named button,
/// link, portfolio.
pub fn classify_click(click: &ClickContext) -> Vec<TelemetryEvent> {
    let mut events = Vec::new();

    if let Some(ref id) = click.element_id {
        events.extend(cta_click(id, &click.text, &click.page_location));
        events.extend(button_click(id));
    }
    if let Some(target) = click
        .href
        .as_deref()
        .and_then(|href| classify_link(href, &click.current_host))
    {
        events.push(link_click(&target, &click.text, &click.page_location));
    }
    if click.is_portfolio_item {
        events.push(portfolio_view(
            click.portfolio_title.as_deref(),
            &click.page_location,
        ));
    }
    events
}
