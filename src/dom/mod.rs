//! A minimal headless document model.
//!
//! The widget layer operates on a page; this module supplies one without a
//! browser: an element tree with attributes and class lists, HTML ingest
//! and serialization, and synchronous click/keydown dispatch with
//! browser-style propagation.
//!
//! Lookup misses (absent attributes, unmatched queries) are `Option`s, not
//! errors. [`DomError`] covers bad names, hierarchy violations, and
//! failures raised by listeners during dispatch.

mod document;
mod element;
mod errors;
mod events;
mod parse;
mod render;

pub use document::Document;
pub use element::{Element, Node, WeakElement};
pub use errors::{DomError, DomResult};
pub use events::keys;
pub use events::{ClickEvent, ClickListener, KeydownEvent, KeydownListener};
