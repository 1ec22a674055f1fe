//! Error types for document operations.

use thiserror::Error;

/// Result type for fallible document operations.
pub type DomResult<T> = std::result::Result<T, DomError>;

/// Errors raised by the document model.
///
/// Lookup misses are never errors here: queries return `Option` and the
/// widget layer treats absent identifiers as silent no-ops. These variants
/// cover the operations a live document would reject outright.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("invalid tag name '{0}'")]
    InvalidTagName(String),

    #[error("invalid attribute name '{0}'")]
    InvalidAttributeName(String),

    /// Class tokens must be non-empty and contain no whitespace.
    #[error("invalid class token '{0}'")]
    InvalidClassToken(String),

    /// An element cannot be inserted into itself or its own subtree.
    #[error("element cannot be inserted into itself or its own subtree")]
    HierarchyViolation,

    /// A listener failed. Dispatch stops at the first failing listener and
    /// hands the error back to whoever dispatched the event.
    #[error("listener failed: {0}")]
    Listener(#[from] anyhow::Error),
}
