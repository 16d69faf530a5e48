//! Page runtime: component construction, hook guards, and event routing.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use engage_consent::{ConsentChoice, ConsentGate, ConsentState, DisplayMode, DisplayModePreference};
use engage_core::constants::PARALLAX_SPEED;
use engage_core::errors::SubmissionError;
use engage_core::surface::{ElementId, EventKind, HandlerRegistry, Surface, UiEvent};
use engage_core::traits::{AnalyticsSink, FormTransport, PreferenceStore};
use engage_core::EngageConfig;
use engage_forms::live::{on_field_blur, on_field_focus};
use engage_forms::{ContactFormView, ContactPrefill, ReqwestTransport, SubmissionOutcome, SubmissionPipeline};
use engage_quote::calculator::{BUSINESS_TYPE_FIELD, PAGE_COUNT_FIELD};
use engage_quote::{AddOn, CalculatorInput, QuoteResultController, QuoteView};
use engage_telemetry::interactions::{classify_click, is_cta, is_tracked_button, ClickContext};
use engage_telemetry::{
    Debouncer, FrameScheduler, TelemetryEmitter, TelemetrySwitch, ThresholdTracker, VisibilityTracker,
};

use crate::effects::PageEffect;
use crate::hooks;
use crate::state::{PageState, QuoteWidget, ScrollSample};

struct ContactForm<T> {
    pipeline: SubmissionPipeline<T>,
    view: Arc<dyn ContactFormView>,
}

/// Collects the page's collaborators before wiring.
pub struct PageBuilder {
    config: EngageConfig,
    surface: Arc<dyn Surface>,
    sink: Arc<dyn AnalyticsSink>,
    store: Arc<dyn PreferenceStore>,
    quote_view: Option<Box<dyn QuoteView + Send>>,
    contact_view: Option<Arc<dyn ContactFormView>>,
}

impl PageBuilder {
    pub fn new(
        config: EngageConfig,
        surface: Arc<dyn Surface>,
        sink: Arc<dyn AnalyticsSink>,
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            config,
            surface,
            sink,
            store,
            quote_view: None,
            contact_view: None,
        }
    }

    pub fn config(&self) -> &EngageConfig {
        &self.config
    }

    /// Rendering target for the quote calculator result.
    pub fn quote_view(mut self, view: impl QuoteView + Send + 'static) -> Self {
        self.quote_view = Some(Box::new(view));
        self
    }

    pub fn contact_view(mut self, view: Arc<dyn ContactFormView>) -> Self {
        self.contact_view = Some(view);
        self
    }

    /// Build with the HTTP transport configured under `[forms]`.
    pub fn build_with_http(self) -> Result<Page<ReqwestTransport>, SubmissionError> {
        let transport = ReqwestTransport::from_config(&self.config.forms)?;
        Ok(self.build(transport))
    }

    pub fn build<T: FormTransport>(self, transport: T) -> Page<T> {
        let PageBuilder {
            config,
            surface,
            sink,
            store,
            quote_view,
            contact_view,
        } = self;

        let switch = Arc::new(TelemetrySwitch::from_config(&config.telemetry));
        let emitter = Arc::new(TelemetryEmitter::new(switch, sink, surface.path()));
        let consent = ConsentGate::load(store.clone(), emitter.clone());

        let mut effects = Vec::new();
        if consent.take_prompt() {
            effects.push(PageEffect::ShowConsentPrompt);
        }

        let toggles = surface.elements_with_class(hooks::DISPLAY_MODE_TOGGLE_CLASS);
        let display_mode = (!toggles.is_empty()).then(|| DisplayModePreference::load(store));
        if display_mode.as_ref().is_some_and(|d| d.mode() == DisplayMode::Dark) {
            effects.push(PageEffect::ApplyDisplayMode(DisplayMode::Dark));
        }

        let cards = surface.elements_with_class(hooks::PRICING_CARD_CLASS);
        let visibility = (!cards.is_empty()).then(|| {
            let mut tracker = VisibilityTracker::service_packages(
                config.telemetry.effective_visibility_ratio(),
                emitter.clone(),
            );
            for card in cards {
                let label = surface.child_text(&card, hooks::PRICING_TITLE_SELECTOR);
                tracker.watch(card, label);
            }
            tracker
        });

        let quote = match quote_view {
            Some(view) => {
                let controller = QuoteResultController::from_config(&config.quote);
                let present = surface.exists(controller.form_id()) && surface.exists(controller.result_id());
                present.then_some(QuoteWidget { controller, view })
            }
            None => None,
        };

        let form_id = ElementId::new(config.forms.effective_form_id());
        let contact_view = contact_view.filter(|_| surface.exists(&form_id));
        if let Some(view) = &contact_view {
            if let Some(prefill) = ContactPrefill::from_query(&surface.query()) {
                prefill.apply(view.as_ref());
            }
        }
        let contact = contact_view.clone().map(|view| {
            Arc::new(ContactForm {
                pipeline: SubmissionPipeline::new(transport, emitter.clone(), &config.forms),
                view,
            })
        });

        let parallax = !surface.elements_with_class(hooks::HERO_BACKGROUND_CLASS).is_empty();

        let state = PageState {
            thresholds: ThresholdTracker::new(
                config.telemetry.effective_scroll_thresholds(),
                emitter.clone(),
            ),
            scroll: Debouncer::from_millis(config.telemetry.effective_debounce_ms()),
            frames: FrameScheduler::new(),
            surface,
            emitter,
            consent,
            display_mode,
            visibility,
            parallax,
            last_offset: 0.0,
            quote,
            contact_view,
            effects,
            now: Instant::now(),
        };

        let mut registry = HandlerRegistry::new();
        wire(&mut registry, &state, &toggles);
        tracing::info!(
            handlers = registry.handler_count(),
            quote = state.quote.is_some(),
            contact = contact.is_some(),
            "page: wired"
        );

        Page {
            state,
            registry,
            contact,
        }
    }
}

/// A wired page.
pub struct Page<T> {
    state: PageState,
    registry: HandlerRegistry<PageState>,
    contact: Option<Arc<ContactForm<T>>>,
}

impl<T: FormTransport> Page<T> {
    /// Handle one input event delivered at `at`.
    pub fn dispatch(&mut self, event: &UiEvent, at: Instant) -> Vec<PageEffect> {
        self.state.now = at;
        self.registry.dispatch(&mut self.state, event);
        self.state.take_effects()
    }

    /// Evaluate scroll depth once the scroll has been quiet for the debounce
    /// window.
    pub fn tick(&mut self, now: Instant) -> Vec<PageEffect> {
        self.state.now = now;
        if let Some(sample) = self.state.scroll.poll(now) {
            self.state
                .thresholds
                .observe_scroll(sample.offset, sample.scroll_height, sample.viewport_height);
        }
        self.state.take_effects()
    }

    /// Run the repaint-coupled work scheduled since the last frame.
    pub fn animation_frame(&mut self) -> Vec<PageEffect> {
        if self.state.frames.run_frame() && self.state.parallax {
            let offset = self.state.last_offset * PARALLAX_SPEED;
            self.state.effects.push(PageEffect::ParallaxOffset(offset));
        }
        self.state.take_effects()
    }

    /// Effects produced while building the page (consent prompt, saved
    /// display mode).
    pub fn take_effects(&mut self) -> Vec<PageEffect> {
        self.state.take_effects()
    }

    /// Submit the contact form. Resolves to `None` when the page has no
    /// contact form.
    ///
    /// The returned future does not borrow the page, so the host keeps
    /// dispatching events while the request is in flight. Submitting again
    /// before it resolves yields `SubmissionOutcome::Busy`.
    pub fn submit_contact(&self) -> impl Future<Output = Option<SubmissionOutcome>> + 'static
    where
        T: 'static,
    {
        let contact = self.contact.clone();
        async move {
            let contact = contact?;
            Some(contact.pipeline.submit(contact.view.as_ref()).await)
        }
    }

    pub fn record_consent(&mut self, choice: ConsentChoice) -> Vec<PageEffect> {
        apply_consent(&mut self.state, choice);
        self.state.take_effects()
    }

    pub fn consent(&self) -> ConsentState {
        self.state.consent.consent()
    }

    pub fn emitter(&self) -> &Arc<TelemetryEmitter> {
        &self.state.emitter
    }

    /// Current display mode, if the page has a toggle.
    pub fn display_mode(&self) -> Option<DisplayMode> {
        self.state.display_mode.as_ref().map(DisplayModePreference::mode)
    }

    pub fn quote(&self) -> Option<&QuoteResultController> {
        self.state.quote.as_ref().map(|q| &q.controller)
    }

    pub fn has_contact_form(&self) -> bool {
        self.contact.is_some()
    }

    pub fn handler_count(&self) -> usize {
        self.registry.handler_count()
    }
}

fn apply_consent(state: &mut PageState, choice: ConsentChoice) {
    state.consent.record(choice);
    state.effects.push(PageEffect::HideConsentPrompt);
}

/// Register handlers for every component whose hooks are present.
fn wire(registry: &mut HandlerRegistry<PageState>, state: &PageState, toggles: &[ElementId]) {
    registry.on(hooks::CONSENT_ACCEPT_ID, EventKind::Click, |state, _| {
        apply_consent(state, ConsentChoice::Accepted);
    });
    registry.on(hooks::CONSENT_DECLINE_ID, EventKind::Click, |state, _| {
        apply_consent(state, ConsentChoice::Declined);
    });

    registry.on_document(EventKind::Click, |state, event| {
        let Some(target) = event.target() else { return };
        track_click(state, target);
    });

    registry.on_document(EventKind::Scroll, |state, event| {
        let UiEvent::Scroll {
            offset,
            scroll_height,
            viewport_height,
        } = *event
        else {
            return;
        };
        state.last_offset = offset;
        let now = state.now;
        state.scroll.push(
            now,
            ScrollSample {
                offset,
                scroll_height,
                viewport_height,
            },
        );
        if state.parallax {
            state.frames.request();
        }
    });

    if state.visibility.is_some() {
        registry.on_document(EventKind::Visibility, |state, event| {
            if let (Some(tracker), UiEvent::Visibility { target, ratio }) = (&state.visibility, event) {
                tracker.on_visibility(target, *ratio);
            }
        });
    }

    for toggle in toggles {
        registry.on(toggle.clone(), EventKind::Click, |state, _| {
            if let Some(pref) = &state.display_mode {
                let mode = pref.toggle();
                state.effects.push(PageEffect::ApplyDisplayMode(mode));
                state.effects.push(PageEffect::Announce(mode.announcement().to_string()));
            }
        });
    }

    if let Some(quote) = &state.quote {
        registry.on(quote.controller.form_id().clone(), EventKind::Submit, |state, _| {
            let input = read_calculator(state.surface.as_ref());
            if let Some(q) = state.quote.as_mut() {
                q.controller.calculate(q.view.as_mut(), &input);
            }
        });
        registry.on_document(EventKind::KeyDown, |state, event| {
            if let (Some(q), UiEvent::KeyDown { key }) = (state.quote.as_mut(), event) {
                q.controller.on_key(q.view.as_mut(), key);
            }
        });
        registry.on_document(EventKind::Click, |state, event| {
            let surface = state.surface.as_ref();
            if let (Some(q), Some(target)) = (state.quote.as_mut(), event.target()) {
                q.controller.on_click(q.view.as_mut(), surface, target);
            }
        });
    }

    if state.contact_view.is_some() {
        registry.on_document(EventKind::Focus, |state, event| {
            if let (Some(view), Some(target)) = (&state.contact_view, event.target()) {
                on_field_focus(view.as_ref(), target.as_str());
            }
        });
        registry.on_document(EventKind::Blur, |state, event| {
            if let (Some(view), Some(target)) = (&state.contact_view, event.target()) {
                on_field_blur(view.as_ref(), target.as_str());
            }
        });
    }
}

/// Resolve the hooked elements around the click target, then classify.
/// A click on a label or icon counts for the button, link, or portfolio
/// item wrapping it.
fn track_click(state: &PageState, target: &ElementId) {
    let surface = state.surface.as_ref();
    let button = surface
        .closest(target, &|id| is_tracked_button(id.as_str()))
        .or_else(|| surface.closest(target, &|id| is_cta(id.as_str())));
    let link = surface.closest(target, &|id| surface.attribute(id, "href").is_some());
    let portfolio_item =
        surface.closest(target, &|id| surface.has_class(id, hooks::PORTFOLIO_ITEM_CLASS));

    let labelled = button.as_ref().or(link.as_ref()).unwrap_or(target);
    let click = ClickContext {
        element_id: button.as_ref().map(|b| b.as_str().to_string()),
        text: surface.text(labelled).unwrap_or_default(),
        href: link.as_ref().and_then(|l| surface.attribute(l, "href")),
        is_portfolio_item: portfolio_item.is_some(),
        portfolio_title: portfolio_item
            .as_ref()
            .and_then(|item| surface.child_text(item, hooks::PORTFOLIO_TITLE_SELECTOR)),
        page_location: state.emitter.page_location().to_string(),
        current_host: surface.host(),
    };
    for event in classify_click(&click) {
        state.emitter.track(event);
    }
}

fn read_calculator(surface: &dyn Surface) -> CalculatorInput {
    let value = |id: &str| {
        surface
            .attribute(&ElementId::from(id), "value")
            .filter(|v| !v.trim().is_empty())
    };
    let checked = |add_on: AddOn| {
        surface
            .attribute(&ElementId::from(add_on.control_id()), "checked")
            .is_some()
    };
    CalculatorInput {
        business_type: value(BUSINESS_TYPE_FIELD),
        page_count: value(PAGE_COUNT_FIELD),
        ecommerce: checked(AddOn::Ecommerce),
        bilingual: checked(AddOn::Bilingual),
    }
}
