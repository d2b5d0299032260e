//! Extraction result with rendered output and statistics.

use serde::Serialize;

use crate::model::{Block, PageResult};

/// Result of extracting a page range.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// The rendered Markdown
    pub markdown: String,

    /// Structured blocks per page (empty when a backend produced Markdown
    /// directly)
    pub pages: Vec<PageResult>,

    /// First page of the range (1-indexed)
    pub start_page: u32,

    /// Last page of the range, inclusive
    pub end_page: u32,

    /// Total pages in the source document
    pub total_pages: u32,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Number of pages in the extracted range.
    pub fn page_count(&self) -> u32 {
        self.end_page + 1 - self.start_page
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Total number of pages processed
    pub page_count: u32,

    /// Number of headings extracted
    pub heading_count: u32,

    /// Number of paragraphs extracted
    pub paragraph_count: u32,

    /// Number of list items extracted
    pub list_item_count: u32,

    /// Lines dropped as running headers, footers or page stamps
    pub boilerplate_lines_removed: u32,

    /// Approximate word count of the block text (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Count one block by kind.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::ListItem { .. } => self.list_item_count += 1,
            Block::Paragraph { .. } => self.paragraph_count += 1,
        }
    }

    /// Count a page and all of its blocks.
    pub fn add_page_result(&mut self, page: &PageResult) {
        self.add_page();
        for block in &page.blocks {
            self.add_block(block);
        }
    }

    /// Record removed boilerplate lines.
    pub fn add_boilerplate(&mut self, removed: usize) {
        self.boilerplate_lines_removed += removed as u32;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
