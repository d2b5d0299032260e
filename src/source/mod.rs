//! Token sources: where positioned page tokens come from.
//!
//! A [`TokenSource`] stands in for the page renderer that produced the
//! tokens. The pipeline only ever asks for the page count and for one page
//! at a time, so sources may load lazily.

mod json;

pub use json::JsonSource;

use crate::error::{Error, Result};
use crate::model::PageTokens;

/// Provider of positioned tokens, one page at a time.
///
/// Implementations are shared across worker threads while a request runs.
pub trait TokenSource: Send + Sync {
    /// Get a name for this source, used in logs.
    fn name(&self) -> &str {
        "tokens"
    }

    /// Total pages in the document.
    fn page_count(&self) -> u32;

    /// Tokens of one page (1-indexed).
    fn page(&self, number: u32) -> Result<PageTokens>;
}

/// Token source backed by pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<PageTokens>,
}

impl MemorySource {
    /// Create a source from pages in document order.
    ///
    /// Pages are renumbered 1..=n.
    pub fn new(pages: Vec<PageTokens>) -> Self {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, mut page)| {
                page.number = i as u32 + 1;
                page
            })
            .collect();
        Self { pages }
    }

    /// Append a page.
    pub fn push(&mut self, mut page: PageTokens) {
        page.number = self.pages.len() as u32 + 1;
        self.pages.push(page);
    }

    /// Get all pages.
    pub fn pages(&self) -> &[PageTokens] {
        &self.pages
    }
}

impl From<Vec<PageTokens>> for MemorySource {
    fn from(pages: Vec<PageTokens>) -> Self {
        Self::new(pages)
    }
}

impl TokenSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<PageTokens> {
        number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }
}
