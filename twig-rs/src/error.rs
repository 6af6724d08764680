//! Error types for xml-twig.

use thiserror::Error;

/// Result type alias for xml-twig operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning, parsing or persisting a document.
///
/// Every variant aborts the current parse; no partial tree is returned.
#[derive(Error, Debug)]
pub enum Error {
    /// A quoted attribute value never closes its quote.
    #[error("malformed attributes in <{tag}>: unclosed quotation")]
    MalformedAttributes { tag: String },

    /// An attribute token has no `=` separating key and value.
    #[error("attribute `{token}` has no value")]
    MissingAttributeValue { token: String },

    /// A closing tag appeared for a tag name that was never opened.
    #[error("closing tag </{tag}> has no matching opening tag")]
    UnbalancedCloseTag { tag: String },

    /// Input ended while tags were still open (or over-closed).
    #[error("incomplete XML tree: unbalanced tags {}", .open.join(", "))]
    IncompleteTree { open: Vec<String> },

    /// A `<` was found without a closing `>`.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag { offset: usize },

    /// No root tag with a matching closing tag could be located.
    #[error("cannot identify root tag")]
    CannotIdentifyRoot,

    /// Several same-named top-level elements where a single root was expected.
    #[error("XML contains {} sibling root elements", .fragments.len())]
    UnseparatedChildren { fragments: Vec<String> },

    /// Nesting exceeded the configured parser depth.
    #[error("document nesting exceeds depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the separated fragments carried by `UnseparatedChildren`.
    ///
    /// Callers can use these to retry parsing one fragment at a time.
    pub fn fragments(&self) -> Option<&[String]> {
        match self {
            Error::UnseparatedChildren { fragments } => Some(fragments),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_only_on_unseparated() {
        let err = Error::UnseparatedChildren {
            fragments: vec!["<a></a>".to_string(), "<a></a>".to_string()],
        };
        assert_eq!(err.fragments().map(|f| f.len()), Some(2));
        assert!(Error::CannotIdentifyRoot.fragments().is_none());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::IncompleteTree {
            open: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "incomplete XML tree: unbalanced tags a, b");

        let err = Error::UnbalancedCloseTag {
            tag: "item".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "closing tag </item> has no matching opening tag"
        );
    }
}
