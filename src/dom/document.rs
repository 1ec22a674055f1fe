//! The document handle: body element, document-level listeners and event
//! dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use super::element::Element;
use super::errors::DomResult;
use super::events::{ClickEvent, ClickListener, KeydownEvent, KeydownListener};
use super::parse;

struct DocumentData {
    body: Element,
    click_listeners: RefCell<Vec<Rc<ClickListener>>>,
    keydown_listeners: RefCell<Vec<Rc<KeydownListener>>>,
}

/// Handle to one page's document. Cheap to clone; every clone shares the
/// same body and listener lists. Single-threaded; handles are `!Send`.
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentData>,
}

impl Document {
    /// Create a document with an empty body.
    pub fn new() -> Self {
        Self::with_body(Element::new_internal("body"))
    }

    /// Build a document from an HTML string. The body subtree (and the
    /// body's own attributes) are kept; comments and doctypes are
    /// discarded. Markup without an explicit `<body>` still parses; the
    /// HTML parser synthesizes one.
    pub fn parse(html: &str) -> Self {
        let parsed = parse::body(html);
        let body = Element::new_internal("body");
        for (name, value) in &parsed.attrs {
            body.set_attr_raw(name, value);
        }
        for node in parsed.nodes {
            body.adopt(node);
        }
        Self::with_body(body)
    }

    fn with_body(body: Element) -> Self {
        Self {
            inner: Rc::new(DocumentData {
                body,
                click_listeners: RefCell::new(Vec::new()),
                keydown_listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The document root element. Page-wide marker classes live here.
    pub fn body(&self) -> Element {
        self.inner.body.clone()
    }

    /// Serialize the body subtree.
    pub fn to_html(&self) -> String {
        self.inner.body.outer_html()
    }

    // --- Listeners ----------------------------------------------------

    /// Attach a document-level click listener. It runs after every
    /// element-scoped listener on the propagation path.
    pub fn on_click<F>(&self, listener: F)
    where
        F: Fn(&ClickEvent) -> DomResult<()> + 'static,
    {
        self.inner
            .click_listeners
            .borrow_mut()
            .push(Rc::new(listener));
    }

    /// Attach a document-level keydown listener.
    pub fn on_keydown<F>(&self, listener: F)
    where
        F: Fn(&KeydownEvent) -> DomResult<()> + 'static,
    {
        self.inner
            .keydown_listeners
            .borrow_mut()
            .push(Rc::new(listener));
    }

    // --- Dispatch -----------------------------------------------------

    /// Dispatch a click to `target`. Listeners run along the propagation
    /// path: the target's own first, then each ancestor's nearest-first,
    /// then the document-level list. The path is fixed before the first
    /// listener runs, so listeners that mutate the tree cannot reroute the
    /// event mid-flight. The first listener `Err` aborts dispatch and is
    /// handed back to the caller.
    pub fn dispatch_click(&self, target: &Element) -> DomResult<()> {
        let mut listeners = target.click_listeners();
        for ancestor in target.ancestors() {
            listeners.extend(ancestor.click_listeners());
        }
        listeners.extend(self.inner.click_listeners.borrow().iter().cloned());

        let event = ClickEvent::new(target.clone());
        for listener in listeners {
            listener(&event)?;
        }
        Ok(())
    }

    /// Dispatch a key press to the document-level keydown listeners.
    pub fn dispatch_keydown(&self, key: &str) -> DomResult<()> {
        let listeners: Vec<_> = self.inner.keydown_listeners.borrow().iter().cloned().collect();
        let event = KeydownEvent::new(key);
        for listener in listeners {
            listener(&event)?;
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
