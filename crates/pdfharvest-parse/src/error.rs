//! Error types for the document-source layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. A [`ParseError`]
//! is fatal for the document: extraction produces no partial result
//! when the bytes cannot be decoded at all.

use thiserror::Error;

/// Error type for document decoding and page access.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The bytes do not decode as a PDF document.
    #[error("PDF decode error: {0}")]
    Decode(String),

    /// The document is encrypted and neither the supplied password nor
    /// the empty password opens it.
    #[error("PDF is encrypted and the password was rejected")]
    InvalidPassword,

    /// Error reading document data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A 1-based page number outside the document.
    #[error("page {number} is out of range (document has {count} pages)")]
    PageOutOfRange { number: usize, count: usize },

    /// A page's content stream could not be interpreted.
    #[error("content stream error on page {page}: {message}")]
    Content { page: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ParseError::Decode("bad header".into());
        assert_eq!(err.to_string(), "PDF decode error: bad header");

        let err = ParseError::PageOutOfRange {
            number: 9,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "page 9 is out of range (document has 3 pages)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ParseError = io_err.into();
        assert!(matches!(err, ParseError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
