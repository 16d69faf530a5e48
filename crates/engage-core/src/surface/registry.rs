//! HandlerRegistry: explicit (element, event kind) → handler bindings.

use std::collections::HashMap;

use super::element::{ElementId, EventKind, UiEvent};

/// A registered handler. Receives the owner's mutable context and the event.
pub type Handler<C> = Box<dyn FnMut(&mut C, &UiEvent) + Send>;

/// Where a handler listens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Events delivered to one specific element.
    Element(ElementId, EventKind),
    /// Every event of this kind, wherever it was delivered.
    Document(EventKind),
}

/// Synchronous handler registry.
///
/// Element handlers run before document handlers, each group in
/// registration order. A panicking handler is logged and skipped so one
/// misconfigured widget cannot take the rest of the page down.
pub struct HandlerRegistry<C> {
    handlers: HashMap<Binding, Vec<Handler<C>>>,
}

impl<C> HandlerRegistry<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind a handler to one element's events of `kind`.
    pub fn on(
        &mut self,
        element: impl Into<ElementId>,
        kind: EventKind,
        handler: impl FnMut(&mut C, &UiEvent) + Send + 'static,
    ) {
        self.handlers
            .entry(Binding::Element(element.into(), kind))
            .or_default()
            .push(Box::new(handler));
    }

    /// Bind a handler to every event of `kind`.
    pub fn on_document(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&mut C, &UiEvent) + Send + 'static,
    ) {
        self.handlers
            .entry(Binding::Document(kind))
            .or_default()
            .push(Box::new(handler));
    }

    pub fn is_bound(&self, binding: &Binding) -> bool {
        self.handlers.get(binding).is_some_and(|h| !h.is_empty())
    }

    /// Total number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Route an event to its handlers. Returns how many handlers ran.
    pub fn dispatch(&mut self, ctx: &mut C, event: &UiEvent) -> usize {
        let kind = event.kind();
        let mut ran = 0;

        if let Some(target) = event.target() {
            let binding = Binding::Element(target.clone(), kind);
            if let Some(handlers) = self.handlers.get_mut(&binding) {
                ran += run_all(handlers, ctx, event);
            }
        }
        if let Some(handlers) = self.handlers.get_mut(&Binding::Document(kind)) {
            ran += run_all(handlers, ctx, event);
        }
        ran
    }
}

impl<C> Default for HandlerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn run_all<C>(handlers: &mut [Handler<C>], ctx: &mut C, event: &UiEvent) -> usize {
    let mut ran = 0;
    for handler in handlers.iter_mut() {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            handler(ctx, event);
        }));
        match result {
            Ok(()) => ran += 1,
            Err(_) => {
                tracing::error!(kind = ?event.kind(), "surface: handler panicked; skipping");
            }
        }
    }
    ran
}
