//! Element identities, input events, and the read-only surface queries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an element on the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of input event, used as half of a handler binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    KeyDown,
    Scroll,
    Focus,
    Blur,
    Visibility,
}

/// A discrete input event delivered by the hosting page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click { target: ElementId },
    Submit { form: ElementId },
    KeyDown { key: String },
    Scroll {
        offset: f64,
        scroll_height: f64,
        viewport_height: f64,
    },
    Focus { target: ElementId },
    Blur { target: ElementId },
    /// A watched element's on-screen visible fraction changed.
    Visibility { target: ElementId, ratio: f64 },
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Submit { .. } => EventKind::Submit,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Focus { .. } => EventKind::Focus,
            Self::Blur { .. } => EventKind::Blur,
            Self::Visibility { .. } => EventKind::Visibility,
        }
    }

    /// The element the event was delivered to, if it has one.
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Self::Click { target }
            | Self::Focus { target }
            | Self::Blur { target }
            | Self::Visibility { target, .. } => Some(target),
            Self::Submit { form } => Some(form),
            Self::KeyDown { .. } | Self::Scroll { .. } => None,
        }
    }
}

/// Read-only queries against the hosting page.
pub trait Surface: Send + Sync {
    /// Whether the element is present. Components check their hooks with
    /// this before activating.
    fn exists(&self, id: &ElementId) -> bool;

    /// Parent of the element, `None` at the root or for unknown ids.
    fn parent(&self, id: &ElementId) -> Option<ElementId>;

    /// Whether `target` is `container` or one of its descendants.
    fn contains(&self, container: &ElementId, target: &ElementId) -> bool {
        self.closest(target, &|id| id == container).is_some()
    }

    /// `target` or its nearest ancestor satisfying `matches`. Events are
    /// delivered to the innermost element, so hooks placed on a wrapper
    /// resolve through this.
    fn closest(
        &self,
        target: &ElementId,
        matches: &dyn Fn(&ElementId) -> bool,
    ) -> Option<ElementId> {
        let mut current = Some(target.clone());
        while let Some(id) = current {
            if matches(&id) {
                return Some(id);
            }
            current = self.parent(&id);
        }
        None
    }

    /// Text content of the element.
    fn text(&self, id: &ElementId) -> Option<String>;

    /// Text content of the first descendant matching `selector`.
    fn child_text(&self, id: &ElementId, selector: &str) -> Option<String>;

    fn attribute(&self, id: &ElementId, name: &str) -> Option<String>;

    fn has_class(&self, id: &ElementId, class: &str) -> bool;

    fn elements_with_class(&self, class: &str) -> Vec<ElementId>;

    /// Path component of the current page location.
    fn path(&self) -> String;

    /// Host name of the current page location.
    fn host(&self) -> String;

    /// Query string of the current page location, without the leading `?`.
    fn query(&self) -> String;
}
