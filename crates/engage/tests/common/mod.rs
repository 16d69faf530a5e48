#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use engage_core::errors::{SubmissionError, TelemetryError};
use engage_core::surface::{ElementId, Surface};
use engage_core::traits::{AnalyticsSink, FormTransport, TransportResponse};
use engage_core::types::TelemetryEvent;
use engage_forms::{ContactFormView, FormField, InvalidReason};
use engage_quote::{Announcement, QuoteDisplay, QuoteView};
use tokio::sync::Notify;

// ── Surface ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
struct Element {
    parent: Option<String>,
    classes: HashSet<String>,
    text: Option<String>,
    attributes: HashMap<String, String>,
    child_text: HashMap<String, String>,
}

/// In-memory page tree.
#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: HashMap<String, Element>,
    path: String,
    host: String,
    query: String,
}

impl MemorySurface {
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            host: "example.com".to_string(),
            ..Default::default()
        }
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn element(mut self, id: &str, parent: Option<&str>) -> Self {
        let element = self.elements.entry(id.to_string()).or_default();
        element.parent = parent.map(str::to_string);
        self
    }

    pub fn class(mut self, id: &str, class: &str) -> Self {
        self.elements
            .entry(id.to_string())
            .or_default()
            .classes
            .insert(class.to_string());
        self
    }

    pub fn text(mut self, id: &str, text: &str) -> Self {
        self.elements.entry(id.to_string()).or_default().text = Some(text.to_string());
        self
    }

    pub fn attr(mut self, id: &str, name: &str, value: &str) -> Self {
        self.elements
            .entry(id.to_string())
            .or_default()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn child_text(mut self, id: &str, selector: &str, text: &str) -> Self {
        self.elements
            .entry(id.to_string())
            .or_default()
            .child_text
            .insert(selector.to_string(), text.to_string());
        self
    }
}

impl Surface for MemorySurface {
    fn exists(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id.as_str())
    }

    fn parent(&self, id: &ElementId) -> Option<ElementId> {
        self.elements
            .get(id.as_str())
            .and_then(|e| e.parent.as_deref())
            .map(ElementId::from)
    }

    fn text(&self, id: &ElementId) -> Option<String> {
        self.elements.get(id.as_str()).and_then(|e| e.text.clone())
    }

    fn child_text(&self, id: &ElementId, selector: &str) -> Option<String> {
        self.elements
            .get(id.as_str())
            .and_then(|e| e.child_text.get(selector).cloned())
    }

    fn attribute(&self, id: &ElementId, name: &str) -> Option<String> {
        self.elements
            .get(id.as_str())
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.elements
            .get(id.as_str())
            .is_some_and(|e| e.classes.contains(class))
    }

    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, e)| e.classes.contains(class))
            .map(|(id, _)| ElementId::from(id.as_str()))
            .collect();
        ids.sort();
        ids
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn host(&self) -> String {
        self.host.clone()
    }

    fn query(&self) -> String {
        self.query.clone()
    }
}

// ── Analytics ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingSink {
    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }
}

impl AnalyticsSink for RecordingSink {
    fn send(&self, event: &TelemetryEvent) -> Result<(), TelemetryError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ── Transport ─────────────────────────────────────────────────────────────

pub struct FixedTransport(pub u16);

/// Answers 200 once the test opens the gate.
#[derive(Default)]
pub struct GatedTransport {
    pub gate: Arc<Notify>,
    pub calls: Arc<AtomicUsize>,
}

impl FormTransport for FixedTransport {
    async fn post_form(
        &self,
        _endpoint: &str,
        _fields: &[(String, String)],
    ) -> Result<TransportResponse, SubmissionError> {
        Ok(TransportResponse::new(self.0))
    }
}

impl FormTransport for GatedTransport {
    async fn post_form(
        &self,
        _endpoint: &str,
        _fields: &[(String, String)],
    ) -> Result<TransportResponse, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(TransportResponse::new(200))
    }
}

// ── Quote view ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct QuoteViewLog {
    pub rendered: Vec<QuoteDisplay>,
    pub shown: bool,
    pub announcements: Vec<(String, Announcement)>,
    pub field_errors: Vec<(String, String)>,
}

/// Quote view whose log stays readable after the page takes ownership.
#[derive(Clone, Default)]
pub struct SharedQuoteView(pub Arc<Mutex<QuoteViewLog>>);

impl QuoteView for SharedQuoteView {
    fn render(&mut self, display: &QuoteDisplay) {
        self.0.lock().unwrap().rendered.push(display.clone());
    }
    fn set_shown(&mut self, shown: bool) {
        self.0.lock().unwrap().shown = shown;
    }
    fn announce(&mut self, message: &str, priority: Announcement) {
        self.0
            .lock()
            .unwrap()
            .announcements
            .push((message.to_string(), priority));
    }
    fn focus_submit(&mut self) {}
    fn focus_result(&mut self) {}
    fn show_field_error(&mut self, field: &str, message: &str) {
        self.0
            .lock()
            .unwrap()
            .field_errors
            .push((field.to_string(), message.to_string()));
    }
    fn clear_field_errors(&mut self) {
        self.0.lock().unwrap().field_errors.clear();
    }
}

// ── Contact view ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ContactState {
    pub fields: Vec<FormField>,
    pub errors: BTreeMap<String, InvalidReason>,
    pub focused: Option<String>,
    pub label: String,
    pub enabled: bool,
    pub success_visible: bool,
    pub error_visible: bool,
}

pub struct MemoryContactView {
    initial: Vec<FormField>,
    pub state: Mutex<ContactState>,
}

impl MemoryContactView {
    pub fn new(fields: Vec<FormField>) -> Self {
        let initial = fields.iter().cloned().map(|f| f.with_value("")).collect();
        Self {
            initial,
            state: Mutex::new(ContactState {
                fields,
                label: "Send Message".into(),
                enabled: true,
                ..Default::default()
            }),
        }
    }

    pub fn value(&self, name: &str) -> String {
        self.state
            .lock()
            .unwrap()
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }
}

impl ContactFormView for MemoryContactView {
    fn fields(&self) -> Vec<FormField> {
        self.state.lock().unwrap().fields.clone()
    }
    fn set_field_value(&self, name: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(f) = state.fields.iter_mut().find(|f| f.name == name) {
            f.value = value.to_string();
        }
    }
    fn show_field_error(&self, name: &str, reason: InvalidReason) {
        self.state.lock().unwrap().errors.insert(name.to_string(), reason);
    }
    fn clear_field_error(&self, name: &str) {
        self.state.lock().unwrap().errors.remove(name);
    }
    fn focus_field(&self, name: &str) {
        self.state.lock().unwrap().focused = Some(name.to_string());
    }
    fn submit_label(&self) -> String {
        self.state.lock().unwrap().label.clone()
    }
    fn set_submit_label(&self, label: &str) {
        self.state.lock().unwrap().label = label.to_string();
    }
    fn set_submit_enabled(&self, enabled: bool) {
        self.state.lock().unwrap().enabled = enabled;
    }
    fn set_success_visible(&self, visible: bool) {
        self.state.lock().unwrap().success_visible = visible;
    }
    fn set_error_visible(&self, visible: bool) {
        self.state.lock().unwrap().error_visible = visible;
    }
    fn reset(&self) {
        self.state.lock().unwrap().fields = self.initial.clone();
    }
}
