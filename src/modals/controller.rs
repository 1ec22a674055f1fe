//! The dialog controller.
//!
//! Owns the registry of dialog roots on a page, toggles the open marker
//! classes, resets embedded video playback on close, and binds the three
//! standard dismissal interactions (close button, backdrop click, Escape).
//!
//! Missing identifiers are expected, ignorable conditions: `open` and
//! `close` on an unknown key change nothing and return `Ok`. Callers who
//! want strict behavior can check [`Modals::contains`] first.

use std::collections::HashMap;
use std::rc::Rc;

use crate::contract::{attrs, classes};
use crate::dom::{keys, Document, DomResult, Element};

/// Dialog controller for one document.
pub struct Modals {
    document: Document,
    registry: HashMap<String, Element>,
}

impl Modals {
    /// Scan policy: every element carrying a dialog identifier attribute,
    /// in document order. Elements whose identifier is absent or empty are
    /// skipped. Duplicated identifiers resolve last-wins in the registry.
    pub fn discover(document: &Document) -> Vec<(String, Element)> {
        document
            .body()
            .select_with_attr(attrs::MODAL_ID)
            .into_iter()
            .filter_map(|el| match el.attr(attrs::MODAL_ID) {
                Some(id) if !id.is_empty() => Some((id, el)),
                _ => None,
            })
            .collect()
    }

    /// Construct from an injected sequence of (identifier, element) pairs.
    /// Performs no scan and binds no events; entries are taken verbatim,
    /// including empty identifiers if the caller supplies them.
    pub fn from_entries<I>(document: &Document, entries: I) -> Rc<Self>
    where
        I: IntoIterator<Item = (String, Element)>,
    {
        Rc::new(Self {
            document: document.clone(),
            registry: entries.into_iter().collect(),
        })
    }

    /// The composed path: discover, construct, bind dismissal events.
    pub fn install(document: &Document) -> Rc<Self> {
        let modals = Self::from_entries(document, Self::discover(document));
        modals.bind_events();
        modals
    }

    // --- Queries ------------------------------------------------------

    /// The registered dialog element for an identifier, if any. Hands back
    /// the same node the registry holds, never a copy.
    pub fn get(&self, id: &str) -> Option<Element> {
        self.registry.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains_key(id)
    }

    /// Registered identifiers, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Whether a dialog currently carries the open marker. `false` for
    /// unknown identifiers.
    pub fn is_open(&self, id: &str) -> bool {
        self.registry
            .get(id)
            .map(|dialog| dialog.has_class(classes::OPEN))
            .unwrap_or(false)
    }

    // --- Operations ---------------------------------------------------

    /// Open a dialog. Unknown identifiers are a silent no-op. Opening an
    /// already-open dialog is idempotent.
    pub fn open(&self, id: &str) -> DomResult<()> {
        let Some(dialog) = self.registry.get(id) else {
            return Ok(());
        };
        self.document.body().add_class(classes::BODY_MODAL_OPEN)?;
        dialog.add_class(classes::OPEN)?;
        Ok(())
    }

    /// Close a dialog. Unknown identifiers are a silent no-op.
    ///
    /// The page-wide marker is removed unconditionally, even when another
    /// dialog is still open. Pages rely on this behavior; callers who need
    /// stricter policy can derive it from [`Modals::is_open`].
    pub fn close(&self, id: &str) -> DomResult<()> {
        let Some(dialog) = self.registry.get(id) else {
            return Ok(());
        };
        self.document
            .body()
            .remove_class(classes::BODY_MODAL_OPEN)?;
        dialog.remove_class(classes::OPEN)?;
        self.reset_video(dialog)?;
        Ok(())
    }

    /// Stop an embedded player by clearing and restoring the frame's
    /// source, which forces a reload. Applies to the first `iframe` in the
    /// dialog nested under a video container; no frame, or no source, is
    /// skipped silently.
    fn reset_video(&self, dialog: &Element) -> DomResult<()> {
        let Some(frame) = dialog
            .select_first(|el| el.tag() == "iframe" && in_video_container(el, dialog))
        else {
            return Ok(());
        };
        if let Some(src) = frame.attr("src") {
            if !src.is_empty() {
                frame.set_attr("src", "")?;
                frame.set_attr("src", &src)?;
            }
        }
        Ok(())
    }

    // --- Event bindings -----------------------------------------------

    /// Bind the dismissal interactions. Established once; dialogs added to
    /// the page later are not picked up. The closures hold weak controller
    /// references, so dropping the last strong handle leaves the bindings
    /// inert.
    pub fn bind_events(self: &Rc<Self>) {
        // Per-dialog close button: the dialog identifier is re-read at
        // click time, falling back to the empty string (a guaranteed
        // registry miss) if the attribute has gone away.
        for dialog in self.registry.values() {
            let Some(button) = dialog.select_first_with_attr(attrs::MODAL_CLOSE) else {
                continue;
            };
            let controller = Rc::downgrade(self);
            let dialog = dialog.downgrade();
            button.on_click(move |_event| {
                let Some(modals) = controller.upgrade() else {
                    return Ok(());
                };
                let Some(dialog) = dialog.upgrade() else {
                    return Ok(());
                };
                let id = dialog.attr(attrs::MODAL_ID).unwrap_or_default();
                modals.close(&id)
            });
        }

        // Backdrop dismissal: only fires when the click target itself is
        // the dialog root, not content inside it.
        let controller = Rc::downgrade(self);
        self.document.on_click(move |event| {
            let Some(modals) = controller.upgrade() else {
                return Ok(());
            };
            let target = event.target();
            if target.has_class(classes::MODAL) {
                let id = target.attr(attrs::MODAL_ID).unwrap_or_default();
                modals.close(&id)?;
            }
            Ok(())
        });

        // Escape closes every registered dialog, open or not.
        let controller = Rc::downgrade(self);
        self.document.on_keydown(move |event| {
            let Some(modals) = controller.upgrade() else {
                return Ok(());
            };
            if event.key() == keys::ESCAPE {
                for id in modals.ids() {
                    modals.close(&id)?;
                }
            }
            Ok(())
        });
    }
}

fn in_video_container(el: &Element, root: &Element) -> bool {
    for ancestor in el.ancestors() {
        if ancestor.has_class(classes::MODAL_VIDEO) {
            return true;
        }
        if ancestor == *root {
            break;
        }
    }
    false
}
