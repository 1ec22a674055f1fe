//! pagekit: a headless page widget layer.
//!
//! Two components on top of a minimal in-memory document model: a modal
//! dialog controller ([`Modals`]) that toggles visibility marker classes
//! and resets embedded video on close, and a page bootstrapper ([`Site`])
//! that inlines icon markup and wires trigger buttons to the controller.
//!
//! The markup contract (which attributes and classes the layer reads and
//! writes) lives in [`contract`]; the document model in [`dom`].
//!
//! ```
//! use pagekit::{Document, Site};
//!
//! let doc = Document::parse(concat!(
//!     "<button data-modal-target=\"video\">watch</button>",
//!     "<div class=\"m-modal\" data-modal-id=\"video\"></div>",
//! ));
//! let site = Site::install(&doc)?;
//!
//! let button = doc.body().select_first(|el| el.tag() == "button").unwrap();
//! doc.dispatch_click(&button)?;
//! assert!(site.modals().is_open("video"));
//! # Ok::<(), pagekit::DomError>(())
//! ```

pub mod contract;
pub mod dom;
pub mod modals;
pub mod site;

pub use dom::{Document, DomError, DomResult, Element};
pub use modals::Modals;
pub use site::Site;
