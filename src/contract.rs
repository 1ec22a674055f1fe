//! The markup contract: the attribute and class names the widget layer
//! reads and writes on a page.

/// Data attributes the layer scans for.
pub mod attrs {
    /// Marks an element as a registrable dialog root; the value is its
    /// lookup key.
    pub const MODAL_ID: &str = "data-modal-id";

    /// Marks a descendant of a dialog as its close trigger.
    pub const MODAL_CLOSE: &str = "data-modal-close";

    /// Wires a clickable element to open the dialog named by the value.
    pub const MODAL_TARGET: &str = "data-modal-target";

    /// Selects inline markup from the static icon catalog.
    pub const ICON: &str = "data-icon";
}

/// Marker classes the layer toggles or matches against.
pub mod classes {
    /// Dialog root marker; also the backdrop click target for
    /// outside-click dismissal.
    pub const MODAL: &str = "m-modal";

    /// Wraps an embedded video frame that gets reset on close.
    pub const MODAL_VIDEO: &str = "m-modal__video";

    /// Element-level open state on a dialog root.
    pub const OPEN: &str = "is-open";

    /// Page-wide open state on the body, set while any dialog is open.
    pub const BODY_MODAL_OPEN: &str = "is-modal-open";

    /// Page-ready marker on the body, set once bootstrap completes.
    pub const BODY_LOADED: &str = "is-loaded";
}
