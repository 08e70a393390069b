//! Error types for dictionary loading and document mutation.
//!
//! Neither kind is allowed to reach the page as visible corruption: a failed
//! dictionary load degrades to an empty dictionary, and a failed mutation
//! aborts only the node it was working on.

use thiserror::Error;

/// Dictionary payload could not be turned into a [`Dictionary`](crate::Dictionary).
#[derive(Debug, Error)]
pub enum ParseError {
    /// Payload is not valid JSON or does not have a recognised shape.
    #[error("Invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload arrived over the JS boundary in an unusable form.
    #[error("Invalid dictionary payload: {0}")]
    Payload(String),

    /// Brand record at the given index has a blank name.
    #[error("Brand at index {0} has an empty name")]
    EmptyName(usize),

    /// Two brand records share a canonical name.
    #[error("Duplicate brand name: {0}")]
    DuplicateEntity(String),
}

/// A document-tree operation could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Node has no parent to be replaced in.
    #[error("Node is detached from the document")]
    Detached,

    /// Reference node is not a child of the given parent.
    #[error("Node is not a child of the given parent")]
    NotAChild,

    /// Operation needs an element but got a text or other node.
    #[error("Node is not an element")]
    NotAnElement,

    /// The host DOM rejected the operation.
    #[error("DOM operation failed: {0}")]
    Host(String),
}

/// A [`ScannerConfig`](crate::ScannerConfig) value that the scanner cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Marker class must be a single plain CSS identifier.
    #[error("Invalid marker class {0:?}: expected one identifier of letters, digits, '-' or '_'")]
    InvalidMarkerClass(String),
}
