//! Input events and listener types for the document model.
//!
//! Events carry the minimum the widget layer needs: a click knows which
//! element it landed on, a key press knows its key name. Listeners return
//! `Result` so a failure inside a handler surfaces to whoever dispatched
//! the event instead of being swallowed mid-dispatch.

use super::element::Element;
use super::errors::DomResult;

/// Key name constants, browser convention.
pub mod keys {
    /// The Escape key as reported by keyboard events.
    pub const ESCAPE: &str = "Escape";
}

/// A click that reached the document.
#[derive(Clone)]
pub struct ClickEvent {
    target: Element,
}

impl ClickEvent {
    pub(crate) fn new(target: Element) -> Self {
        Self { target }
    }

    /// The element the click originally landed on. Stays fixed while the
    /// event travels up the propagation path.
    pub fn target(&self) -> &Element {
        &self.target
    }
}

/// A key press that reached the document.
#[derive(Clone)]
pub struct KeydownEvent {
    key: String,
}

impl KeydownEvent {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key name (`"Escape"`, `"Enter"`, `"a"`, ...).
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Listener signature for click events.
pub type ClickListener = dyn Fn(&ClickEvent) -> DomResult<()>;

/// Listener signature for keydown events.
pub type KeydownListener = dyn Fn(&KeydownEvent) -> DomResult<()>;
