mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{
    FixedTransport, GatedTransport, MemoryContactView, MemorySurface, RecordingSink,
    SharedQuoteView,
};
use engage::{Page, PageBuilder, PageEffect};
use engage_consent::{ConsentState, DisplayMode, MemoryPreferenceStore};
use engage_core::constants::{CONSENT_KEY, DISPLAY_MODE_KEY};
use engage_core::surface::UiEvent;
use engage_core::traits::PreferenceStore;
use engage_core::types::ParamValue;
use engage_core::EngageConfig;
use engage_forms::{FieldKind, FormField, SubmissionOutcome};
use engage_quote::QuoteVisibility;

struct Harness {
    sink: Arc<RecordingSink>,
    store: Arc<MemoryPreferenceStore>,
}

impl Harness {
    fn new() -> Self {
        Self {
            sink: Arc::new(RecordingSink::default()),
            store: Arc::new(MemoryPreferenceStore::new()),
        }
    }

    fn builder(&self, surface: MemorySurface) -> PageBuilder {
        let config = EngageConfig::from_toml(
            r#"
            [forms]
            endpoint = "https://forms.example.com/f/abc"
            "#,
        )
        .unwrap();
        PageBuilder::new(config, Arc::new(surface), self.sink.clone(), self.store.clone())
    }

    fn page(&self, surface: MemorySurface) -> Page<FixedTransport> {
        self.builder(surface).build(FixedTransport(200))
    }

    fn count(&self, name: &str) -> usize {
        self.sink.names().iter().filter(|n| *n == name).count()
    }
}

fn click(id: &str) -> UiEvent {
    UiEvent::Click { target: id.into() }
}

fn scroll(offset: f64) -> UiEvent {
    UiEvent::Scroll {
        offset,
        scroll_height: 2000.0,
        viewport_height: 1000.0,
    }
}

// ── Consent ───────────────────────────────────────────────────────────────

#[test]
fn first_visit_prompts_and_decline_silences_telemetry() {
    let h = Harness::new();
    let surface = MemorySurface::at("/").element("nav-cta", None).text("nav-cta", "Start");
    let mut page = h.page(surface);
    let now = Instant::now();

    assert_eq!(page.take_effects(), vec![PageEffect::ShowConsentPrompt]);
    assert_eq!(page.consent(), ConsentState::Unset);

    page.dispatch(&click("nav-cta"), now);
    assert_eq!(h.count("cta_click"), 1);

    let effects = page.dispatch(&click("ga-decline"), now);
    assert_eq!(effects, vec![PageEffect::HideConsentPrompt]);
    assert_eq!(h.store.get(CONSENT_KEY).unwrap().as_deref(), Some("declined"));

    page.dispatch(&click("nav-cta"), now);
    assert_eq!(h.count("cta_click"), 1);
}

#[test]
fn returning_visitor_is_not_prompted() {
    let h = Harness::new();
    h.store.set(CONSENT_KEY, "accepted").unwrap();
    let mut page = h.page(MemorySurface::at("/"));
    assert!(page.take_effects().is_empty());
    assert_eq!(page.consent(), ConsentState::Accepted);
}

// ── Telemetry routing ─────────────────────────────────────────────────────

#[test]
fn link_and_portfolio_clicks_are_classified() {
    let h = Harness::new();
    let surface = MemorySurface::at("/portfolio.html")
        .element("call-link", None)
        .attr("call-link", "href", "tel:+13015550100")
        .text("call-link", "Call us")
        .element("maps-link", None)
        .attr("maps-link", "href", "https://maps.example.org/x")
        .element("project-1", None)
        .class("project-1", "portfolio-item")
        .child_text("project-1", "h3", "Bakery Redesign");
    let mut page = h.page(surface);
    let now = Instant::now();

    page.dispatch(&click("call-link"), now);
    page.dispatch(&click("maps-link"), now);
    page.dispatch(&click("project-1"), now);

    assert_eq!(
        h.sink.names(),
        vec!["phone_click", "outbound_link_click", "portfolio_view"]
    );
    let events = h.sink.events.lock().unwrap();
    assert_eq!(events[0].param("phone_number"), Some(&ParamValue::from("+13015550100")));
    assert_eq!(events[2].param("project_title"), Some(&ParamValue::from("Bakery Redesign")));
    assert_eq!(events[2].param("page_location"), Some(&ParamValue::from("/portfolio.html")));
}

#[test]
fn clicks_inside_hooked_elements_count_for_the_wrapper() {
    let h = Harness::new();
    let surface = MemorySurface::at("/")
        .element("project-1", None)
        .class("project-1", "portfolio-item")
        .child_text("project-1", "h3", "Bakery Redesign")
        .element("project-1-img", Some("project-1"))
        .element("hero-cta-primary", None)
        .text("hero-cta-primary", "Get a Free Quote")
        .element("hero-cta-primary-label", Some("hero-cta-primary"))
        .text("hero-cta-primary-label", "Free Quote")
        .element("email-link", None)
        .attr("email-link", "href", "mailto:hello@example.com")
        .text("email-link", "hello@example.com")
        .element("email-icon", Some("email-link"));
    let mut page = h.page(surface);
    let now = Instant::now();

    page.dispatch(&click("project-1-img"), now);
    page.dispatch(&click("hero-cta-primary-label"), now);
    page.dispatch(&click("email-icon"), now);

    assert_eq!(
        h.sink.names(),
        vec!["portfolio_view", "cta_click", "button_click", "email_click"]
    );
    let events = h.sink.events.lock().unwrap();
    assert_eq!(events[0].param("project_title"), Some(&ParamValue::from("Bakery Redesign")));
    assert_eq!(events[1].param("button_id"), Some(&ParamValue::from("hero-cta-primary")));
    assert_eq!(events[1].param("button_text"), Some(&ParamValue::from("Get a Free Quote")));
    assert_eq!(events[2].param("event_label"), Some(&ParamValue::from("Hero Primary CTA Click")));
    assert_eq!(events[3].param("email_address"), Some(&ParamValue::from("hello@example.com")));
}

#[test]
fn scroll_depth_is_evaluated_after_the_quiet_window() {
    let h = Harness::new();
    let mut page = h.page(MemorySurface::at("/"));
    let t0 = Instant::now();

    page.dispatch(&scroll(600.0), t0);
    page.dispatch(&scroll(800.0), t0 + Duration::from_millis(100));
    page.tick(t0 + Duration::from_millis(400));
    assert_eq!(h.count("scroll_depth"), 0);

    page.tick(t0 + Duration::from_millis(700));
    assert_eq!(h.count("scroll_depth"), 3);

    page.dispatch(&scroll(300.0), t0 + Duration::from_secs(2));
    page.dispatch(&scroll(800.0), t0 + Duration::from_secs(3));
    page.tick(t0 + Duration::from_secs(5));
    assert_eq!(h.count("scroll_depth"), 3);
}

#[test]
fn parallax_runs_once_per_frame_with_the_latest_offset() {
    let h = Harness::new();
    let surface = MemorySurface::at("/")
        .element("hero-bg", None)
        .class("hero-bg", "hero-gradient-bg");
    let mut page = h.page(surface);
    let now = Instant::now();

    page.dispatch(&scroll(100.0), now);
    page.dispatch(&scroll(240.0), now);
    assert_eq!(page.animation_frame(), vec![PageEffect::ParallaxOffset(120.0)]);
    assert!(page.animation_frame().is_empty());
}

#[test]
fn pricing_cards_report_each_package_once() {
    let h = Harness::new();
    let surface = MemorySurface::at("/services.html")
        .element("card-a", None)
        .class("card-a", "pricing-card")
        .child_text("card-a", ".pricing-title", "Starter")
        .element("card-b", None)
        .class("card-b", "pricing-card");
    let mut page = h.page(surface);
    let now = Instant::now();

    for (target, ratio) in [("card-a", 0.2), ("card-a", 0.7), ("card-a", 1.0), ("card-b", 0.5)] {
        page.dispatch(
            &UiEvent::Visibility {
                target: target.into(),
                ratio,
            },
            now,
        );
    }

    let events = h.sink.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].param("package_name"), Some(&ParamValue::from("Starter")));
    assert_eq!(events[1].param("package_name"), Some(&ParamValue::from("Unknown Package")));
}

// ── Display mode ──────────────────────────────────────────────────────────

#[test]
fn saved_dark_mode_is_applied_and_toggle_announces() {
    let h = Harness::new();
    h.store.set(DISPLAY_MODE_KEY, "enabled").unwrap();
    h.store.set(CONSENT_KEY, "accepted").unwrap();
    let surface = MemorySurface::at("/")
        .element("theme", None)
        .class("theme", "dark-mode-toggle");
    let mut page = h.page(surface);

    assert_eq!(page.take_effects(), vec![PageEffect::ApplyDisplayMode(DisplayMode::Dark)]);
    let effects = page.dispatch(&click("theme"), Instant::now());
    assert_eq!(
        effects,
        vec![
            PageEffect::ApplyDisplayMode(DisplayMode::Light),
            PageEffect::Announce("Light mode activated.".into()),
        ]
    );
    assert_eq!(page.display_mode(), Some(DisplayMode::Light));
    assert_eq!(h.store.get(DISPLAY_MODE_KEY).unwrap().as_deref(), Some("disabled"));
}

// ── Quote calculator ──────────────────────────────────────────────────────

fn quote_surface() -> MemorySurface {
    MemorySurface::at("/services.html")
        .element("quote-form", None)
        .element("business-type", Some("quote-form"))
        .attr("business-type", "value", "restaurant")
        .element("page-count", Some("quote-form"))
        .attr("page-count", "value", "8")
        .element("ecommerce", Some("quote-form"))
        .attr("ecommerce", "checked", "")
        .element("quote-result", None)
        .element("close-quote", Some("quote-result"))
        .class("close-quote", "result-close")
        .element("close-quote-icon", Some("close-quote"))
        .element("footer", None)
}

#[test]
fn quote_is_calculated_shown_and_dismissed() {
    let h = Harness::new();
    let view = SharedQuoteView::default();
    let mut page = h.builder(quote_surface()).quote_view(view.clone()).build(FixedTransport(200));
    let now = Instant::now();

    page.dispatch(&UiEvent::Submit { form: "quote-form".into() }, now);
    {
        let log = view.0.lock().unwrap();
        assert!(log.shown);
        assert_eq!(log.rendered[0].price, "$2,749");
        assert_eq!(
            log.rendered[0].handoff_link,
            "/contact.html?founding=true&quote=professional&price=1924"
        );
    }
    assert_eq!(page.quote().unwrap().visibility(), QuoteVisibility::Shown);

    page.dispatch(&click("page-count"), now);
    assert_eq!(page.quote().unwrap().visibility(), QuoteVisibility::Shown);

    page.dispatch(&UiEvent::KeyDown { key: "Escape".into() }, now);
    assert_eq!(page.quote().unwrap().visibility(), QuoteVisibility::Hidden);

    page.dispatch(&UiEvent::Submit { form: "quote-form".into() }, now);
    page.dispatch(&click("close-quote-icon"), now);
    assert_eq!(page.quote().unwrap().visibility(), QuoteVisibility::Hidden);
    assert_eq!(
        view.0.lock().unwrap().announcements.last().unwrap().0,
        "Quote closed. Returning to calculator."
    );

    page.dispatch(&UiEvent::Submit { form: "quote-form".into() }, now);
    page.dispatch(&click("footer"), now);
    assert_eq!(page.quote().unwrap().visibility(), QuoteVisibility::Hidden);
    assert!(!view.0.lock().unwrap().shown);
}

#[tokio::test]
async fn missing_hooks_leave_features_inactive() {
    let h = Harness::new();
    let contact = Arc::new(MemoryContactView::new(vec![]));
    let page = h
        .builder(MemorySurface::at("/"))
        .quote_view(SharedQuoteView::default())
        .contact_view(contact)
        .build(FixedTransport(200));

    assert!(page.quote().is_none());
    assert!(!page.has_contact_form());
    assert!(page.display_mode().is_none());
    assert!(page.submit_contact().await.is_none());
}

// ── Contact form ──────────────────────────────────────────────────────────

fn contact_fields() -> Vec<FormField> {
    vec![
        FormField::new("name", FieldKind::Text).required().with_value("Ana"),
        FormField::new("email", FieldKind::Email).required().with_value("ana@example.com"),
        FormField::new("website", FieldKind::Url).with_value(""),
        FormField::new("budget", FieldKind::Select),
        FormField::new("message", FieldKind::TextArea).required(),
    ]
}

#[tokio::test]
async fn quote_link_prefills_contact_form_and_submission_is_tracked() {
    let h = Harness::new();
    let view = Arc::new(MemoryContactView::new(contact_fields()));
    let surface = MemorySurface::at("/contact.html")
        .query("founding=true&quote=premium&price=2099")
        .element("contact-form", None);
    let mut page = h.builder(surface).contact_view(view.clone()).build(FixedTransport(200));

    assert_eq!(view.value("budget"), "5000+");
    assert_eq!(view.value("message"), "I'm interested in the Premium Package. ");

    let outcome = page.submit_contact().await;
    assert!(matches!(outcome, Some(SubmissionOutcome::Succeeded)));
    assert_eq!(view.value("name"), "");
    assert!(view.state.lock().unwrap().success_visible);

    let events = h.sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].param("budget"), Some(&ParamValue::from("5000+")));
    assert_eq!(events[0].param("referral_source"), Some(&ParamValue::from("not specified")));
    drop(events);

    page.dispatch(&UiEvent::Blur { target: "email".into() }, Instant::now());
    assert!(view.state.lock().unwrap().errors.contains_key("email"));
}

#[tokio::test]
async fn page_keeps_handling_events_while_a_submission_is_in_flight() {
    let h = Harness::new();
    let view = Arc::new(MemoryContactView::new(contact_fields()));
    view.state.lock().unwrap().fields[4].value = "Hello".into();
    let surface = quote_surface().element("contact-form", None);
    let transport = GatedTransport::default();
    let gate = transport.gate.clone();
    let calls = transport.calls.clone();
    let mut page = h
        .builder(surface)
        .quote_view(SharedQuoteView::default())
        .contact_view(view.clone())
        .build(transport);
    let t0 = Instant::now();

    page.dispatch(&UiEvent::Submit { form: "quote-form".into() }, t0);
    assert_eq!(page.quote().unwrap().visibility(), QuoteVisibility::Shown);

    let submit = page.submit_contact();
    let (outcome, ()) = tokio::join!(submit, async {
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!view.state.lock().unwrap().enabled);
        assert_eq!(view.state.lock().unwrap().label, "Sending...");

        page.dispatch(&UiEvent::KeyDown { key: "Escape".into() }, t0);
        page.dispatch(&scroll(800.0), t0);
        page.tick(t0 + Duration::from_secs(1));
        assert_eq!(page.quote().unwrap().visibility(), QuoteVisibility::Hidden);
        assert_eq!(h.count("scroll_depth"), 3);

        assert!(matches!(page.submit_contact().await, Some(SubmissionOutcome::Busy)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        gate.notify_one();
    });

    assert!(matches!(outcome, Some(SubmissionOutcome::Succeeded)));
    let state = view.state.lock().unwrap();
    assert!(state.enabled);
    assert_eq!(state.label, "Send Message");
    drop(state);
    assert_eq!(h.count("contact_form_submit"), 1);
}

#[test]
fn blur_corrects_url_and_focus_clears_errors() {
    let h = Harness::new();
    let view = Arc::new(MemoryContactView::new(contact_fields()));
    view.state.lock().unwrap().fields[2].value = "example.com".into();
    let surface = MemorySurface::at("/contact.html").element("contact-form", None);
    let mut page = h.builder(surface).contact_view(view.clone()).build(FixedTransport(200));
    let now = Instant::now();

    page.dispatch(&UiEvent::Blur { target: "website".into() }, now);
    assert_eq!(view.value("website"), "https://example.com");

    page.dispatch(&UiEvent::Blur { target: "message".into() }, now);
    assert!(view.state.lock().unwrap().errors.contains_key("message"));
    page.dispatch(&UiEvent::Focus { target: "message".into() }, now);
    assert!(view.state.lock().unwrap().errors.is_empty());
}

// ── Entry point ───────────────────────────────────────────────────────────

#[test]
fn open_reads_project_config_and_uses_its_preference_file() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");
    std::fs::write(
        dir.path().join("engage.toml"),
        format!(
            "[telemetry]\ncollector_id = \"G-SITE\"\n\n[storage]\npreferences_path = '{}'\n",
            prefs.display()
        ),
    )
    .unwrap();

    let sink = Arc::new(RecordingSink::default());
    let builder = engage::open(dir.path(), Arc::new(MemorySurface::at("/")), sink).unwrap();
    assert_eq!(builder.config().telemetry.effective_collector_id(), "G-SITE");

    let mut page = builder.build(FixedTransport(200));
    page.record_consent(engage_consent::ConsentChoice::Declined);
    let saved = std::fs::read_to_string(&prefs).unwrap();
    assert!(saved.contains("declined"));
}
