//! Error types for HDT reading and writing.

use thiserror::Error;

/// Errors that can occur when reading or writing HDT files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The document contains no element at all.
    #[error("no root element found in document")]
    NoRoot,

    /// A second top-level element follows the root.
    #[error("unexpected second root element <{tag}>")]
    MultipleRoots { tag: String },

    /// Elements are nested deeper than the configured limit.
    #[error("element nesting exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
}

/// Result type for HDT operations.
pub type Result<T> = std::result::Result<T, Error>;
