//! Error types for pagedown library.

use std::io;
use thiserror::Error;

/// Result type alias for pagedown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning page tokens into Markdown.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A token dump could not be decoded.
    #[error("Invalid token data: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested page range lies outside the document or is reversed.
    #[error("Invalid page range {start}-{end}: document has {total} pages")]
    InvalidRange {
        /// First requested page (1-indexed)
        start: u32,
        /// Last requested page (1-indexed)
        end: u32,
        /// Pages in the document
        total: u32,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The token backend failed for a page.
    #[error("Failed to extract page {page}: {source}")]
    Extraction {
        /// Page that failed (1-indexed)
        page: u32,
        /// Underlying backend error
        #[source]
        source: Box<Error>,
    },

    /// Every backend in a fallback chain failed.
    #[error("All extraction backends failed: {}", .0.join("; "))]
    AllBackendsFailed(Vec<String>),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a backend error with the page it happened on.
    pub fn extraction(page: u32, source: Error) -> Self {
        Error::Extraction {
            page,
            source: Box::new(source),
        }
    }

    /// Whether the error rejects the request itself rather than a backend.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Error::InvalidRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRange {
            start: 5,
            end: 3,
            total: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid page range 5-3: document has 10 pages"
        );

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_extraction_wraps_source() {
        use std::error::Error as _;

        let err = Error::extraction(4, Error::Other("renderer crashed".into()));
        assert_eq!(err.to_string(), "Failed to extract page 4: renderer crashed");
        assert!(err.source().is_some());
        assert!(!err.is_invalid_range());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_all_backends_failed_display() {
        let err = Error::AllBackendsFailed(vec!["a: boom".into(), "b: bust".into()]);
        assert_eq!(
            err.to_string(),
            "All extraction backends failed: a: boom; b: bust"
        );
    }
}
