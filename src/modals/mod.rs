//! Modal dialog control: registry, open/close by identifier, and the
//! standard dismissal bindings.

mod controller;

pub use controller::Modals;
