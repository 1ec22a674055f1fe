//! The page bootstrapper.
//!
//! One-time page initialization: construct the dialog controller, inline
//! icon markup, signal readiness, and wire trigger buttons to the
//! controller's open operation. [`Site::install`] returns the application
//! context; there is no process-global instance, so two sites on two
//! documents are fully independent.

use std::rc::Rc;

use tracing::warn;

use crate::contract::{attrs, classes};
use crate::dom::{Document, DomResult};
use crate::modals::Modals;

pub mod icons;

/// One initialized page.
pub struct Site {
    document: Document,
    modals: Rc<Modals>,
}

impl Site {
    /// Initialize a page, fully synchronously: dialog controller first,
    /// then icon replacement, then the page-ready marker, then trigger
    /// wiring. A failure partway through propagates out and can leave the
    /// ready marker unset.
    pub fn install(document: &Document) -> DomResult<Rc<Self>> {
        let modals = Modals::install(document);
        replace_icons(document);
        document.body().add_class(classes::BODY_LOADED)?;
        let site = Rc::new(Self {
            document: document.clone(),
            modals,
        });
        site.bind_triggers();
        Ok(site)
    }

    /// The document this site was installed on.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The dialog controller this site constructed.
    pub fn modals(&self) -> &Rc<Modals> {
        &self.modals
    }

    /// Wire every trigger element to the controller. The target
    /// identifier is re-read at click time; an empty or absent value is
    /// warned about and opens nothing.
    fn bind_triggers(self: &Rc<Self>) {
        for trigger in self.document.body().select_with_attr(attrs::MODAL_TARGET) {
            let site = Rc::downgrade(self);
            let trigger_handle = trigger.downgrade();
            trigger.on_click(move |_event| {
                let Some(site) = site.upgrade() else {
                    return Ok(());
                };
                let Some(trigger) = trigger_handle.upgrade() else {
                    return Ok(());
                };
                let target = trigger.attr(attrs::MODAL_TARGET).unwrap_or_default();
                if target.is_empty() {
                    warn!("Modal trigger has no target identifier");
                    return Ok(());
                }
                site.modals.open(&target)
            });
        }
    }
}

/// Replace every icon placeholder's content with catalog markup. Unmatched
/// or empty names are warned about and leave the element's content
/// untouched. The scan is one sequential pass with no per-element
/// isolation.
fn replace_icons(document: &Document) {
    for el in document.body().select_with_attr(attrs::ICON) {
        let name = el.attr(attrs::ICON).unwrap_or_default();
        match icons::markup(&name) {
            Some(markup) => el.set_inner_html(markup),
            None => warn!("Icon '{}' not found", name),
        }
    }
}
