//! Error types for the glossary parser.
//!
//! Missing optional structure is never an error: the parser degrades to
//! empty values instead. HTML is recovered the way a browser recovers it, so
//! only input that cannot be read, or a tree the XML reader rejects, ends up
//! here.

use thiserror::Error;

/// Main error type for the glossary parser library.
#[derive(Debug, Error)]
pub enum GlossaryError {
    /// The XML reader rejected the tree.
    #[error("Markup parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for glossary parser operations.
pub type Result<T> = std::result::Result<T, GlossaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = roxmltree::Document::parse("<dl><div></dl>").unwrap_err();
        let err = GlossaryError::from(err);
        assert!(err.to_string().starts_with("Markup parsing failed:"));
    }

    #[test]
    fn test_io_error_display() {
        let err = GlossaryError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "glossary.html",
        ));
        assert_eq!(err.to_string(), "IO error: glossary.html");
    }
}
