//! Error types for document conversion.

use thiserror::Error;

/// Broad classification of conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document does not have the shape the mapping requires.
    Structural,
    /// An unknown format identifier was requested.
    Format,
    /// The underlying HDT or YAML text could not be parsed or written.
    Syntax,
    /// Reading or writing bytes failed.
    Io,
}

/// Errors that can occur when converting documents.
#[derive(Debug, Error)]
pub enum Error {
    /// A text-bearing element also carries attributes or children.
    #[error("unexpected text in {tag}: {text:?} ({attributes} attributes, {children} children)")]
    TextWithStructure {
        tag: String,
        text: String,
        attributes: usize,
        children: usize,
    },

    /// A non-empty record does not start with its attributes entry.
    #[error("record for {tag} must start with an 'attributes' entry")]
    MissingAttributes { tag: String },

    /// A record for a similarity-carrying tag lacks its similarity entry.
    #[error("record for {tag} is missing its 'similar' entry")]
    MissingSimilarity { tag: String },

    /// The similarity table is present but not well formed.
    #[error("malformed similarity table in {tag}: {reason}")]
    MalformedSimilarity { tag: String, reason: String },

    /// A value has a shape that maps to neither text nor a record.
    #[error("malformed value for {tag}: {reason}")]
    MalformedValue { tag: String, reason: String },

    /// The document root is not a single-entry mapping.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Unrecognised format identifier.
    #[error("unknown format '{0}' (expected one of: hdt, yaml)")]
    UnknownFormat(String),

    /// HDT reading or writing error.
    #[error(transparent)]
    Hdt(#[from] hdconvert_hdt::Error),

    /// YAML reading or writing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TextWithStructure { .. }
            | Self::MissingAttributes { .. }
            | Self::MissingSimilarity { .. }
            | Self::MalformedSimilarity { .. }
            | Self::MalformedValue { .. }
            | Self::MalformedDocument(_) => ErrorKind::Structural,
            Self::UnknownFormat(_) => ErrorKind::Format,
            Self::Hdt(hdconvert_hdt::Error::Io(_)) => ErrorKind::Io,
            Self::Hdt(_) | Self::Yaml(_) => ErrorKind::Syntax,
        }
    }

    /// Whether the document violated the structural rules of the mapping.
    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }

    pub(crate) fn malformed_value(tag: &str, reason: impl Into<String>) -> Self {
        Self::MalformedValue {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_similarity(tag: &str, reason: impl Into<String>) -> Self {
        Self::MalformedSimilarity {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            Error::MissingAttributes { tag: "X".into() }.kind(),
            ErrorKind::Structural
        );
        assert_eq!(Error::UnknownFormat("json".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::Hdt(hdconvert_hdt::Error::NoRoot).kind(), ErrorKind::Syntax);
        assert!(Error::malformed_value("X", "null").is_structural());
    }

    #[test]
    fn test_text_with_structure_message() {
        let error = Error::TextWithStructure {
            tag: "NOTES".into(),
            text: "hello".into(),
            attributes: 1,
            children: 0,
        };
        assert_eq!(
            error.to_string(),
            "unexpected text in NOTES: \"hello\" (1 attributes, 0 children)"
        );
    }
}
