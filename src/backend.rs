//! Extraction backends and fallback chains.
//!
//! A backend turns a page range into an [`Extraction`]. Two adapters are
//! provided: [`TokenPipeline`] runs this crate's layout pipeline over a
//! [`TokenSource`], and [`DirectMarkdown`] wraps an engine that produces
//! Markdown for a whole range by itself. A [`BackendChain`] tries backends in
//! priority order and returns the first success.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pagedown::backend::{BackendChain, TokenPipeline};
//! use pagedown::{ExtractionOptions, MemorySource, PageRange, PageTokens, Token};
//!
//! fn main() -> pagedown::Result<()> {
//!     let source = MemorySource::new(vec![PageTokens::new(
//!         1,
//!         612.0,
//!         vec![Token::new("Hello", 72.0, 110.0, 72.0)],
//!     )]);
//!
//!     let chain = BackendChain::new().with_backend(Arc::new(TokenPipeline::new(
//!         "tokens",
//!         Arc::new(source),
//!         ExtractionOptions::default(),
//!     )));
//!
//!     let result = chain.extract(PageRange::all())?;
//!     assert!(result.markdown.contains("Hello"));
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::extract::{ExtractionOptions, Extractor, PageRange};
use crate::render::{Extraction, ExtractionStats};
use crate::source::TokenSource;

/// A way of turning a page range into Markdown.
///
/// Backends are shared read-only between requests, so any expensive setup
/// happens once when the backend is constructed.
pub trait ExtractionBackend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Extract a page range.
    fn extract(&self, range: PageRange) -> Result<Extraction>;
}

/// Backend running the token layout pipeline.
pub struct TokenPipeline {
    name: String,
    source: Arc<dyn TokenSource>,
    extractor: Extractor,
}

impl TokenPipeline {
    /// Create a pipeline backend over a token source.
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn TokenSource>,
        options: ExtractionOptions,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            extractor: Extractor::new(options),
        }
    }
}

impl ExtractionBackend for TokenPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, range: PageRange) -> Result<Extraction> {
        self.extractor.extract(self.source.as_ref(), range)
    }
}

/// An engine that renders Markdown for a page range on its own.
pub trait MarkdownSource: Send + Sync {
    /// Get the name of this engine.
    fn name(&self) -> &str;

    /// Total pages in the document.
    fn page_count(&self) -> u32;

    /// Markdown for pages `start..=end` (1-indexed, already validated).
    fn markdown_for_document(&self, start: u32, end: u32) -> Result<String>;
}

/// Backend passing through Markdown from a [`MarkdownSource`].
///
/// The result carries no per-page blocks.
pub struct DirectMarkdown {
    source: Arc<dyn MarkdownSource>,
}

impl DirectMarkdown {
    /// Wrap a Markdown engine.
    pub fn new(source: Arc<dyn MarkdownSource>) -> Self {
        Self { source }
    }
}

impl ExtractionBackend for DirectMarkdown {
    fn name(&self) -> &str {
        self.source.name()
    }

    fn extract(&self, range: PageRange) -> Result<Extraction> {
        let total = self.source.page_count();
        let (start, end) = range.resolve(total)?;

        let markdown = self.source.markdown_for_document(start, end)?;
        let markdown = markdown.trim().to_string();

        let mut stats = ExtractionStats::new();
        stats.page_count = end + 1 - start;
        stats.count_text(&markdown);

        Ok(Extraction {
            markdown,
            pages: Vec::new(),
            start_page: start,
            end_page: end,
            total_pages: total,
            stats,
        })
    }
}

/// Backends tried in priority order until one succeeds.
#[derive(Default)]
pub struct BackendChain {
    backends: Vec<Arc<dyn ExtractionBackend>>,
}

impl BackendChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a backend (lowest priority so far).
    pub fn with_backend(mut self, backend: Arc<dyn ExtractionBackend>) -> Self {
        self.push(backend);
        self
    }

    /// Append a backend.
    pub fn push(&mut self, backend: Arc<dyn ExtractionBackend>) {
        self.backends.push(backend);
    }

    /// Number of backends.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Backend names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Run the first backend that succeeds.
    ///
    /// An invalid range is returned immediately, since no backend could
    /// serve it. Other failures move on to the next backend.
    pub fn extract(&self, range: PageRange) -> Result<Extraction> {
        if self.backends.is_empty() {
            return Err(Error::Other("No extraction backends configured".to_string()));
        }

        let mut failures = Vec::new();
        for backend in &self.backends {
            match backend.extract(range) {
                Ok(extraction) => {
                    if !failures.is_empty() {
                        log::info!(
                            "Backend {} succeeded after {} failures",
                            backend.name(),
                            failures.len()
                        );
                    }
                    return Ok(extraction);
                }
                Err(e) if e.is_invalid_range() => return Err(e),
                Err(e) => {
                    log::warn!("Backend {} failed: {}", backend.name(), e);
                    failures.push(format!("{}: {}", backend.name(), e));
                }
            }
        }

        Err(Error::AllBackendsFailed(failures))
    }
}
