//! Layout analysis: columns and lines from positioned tokens.
//!
//! This module reconstructs reading order for a single page. Tokens are
//! split into columns by the widest central gutter, each column is grouped
//! into lines top to bottom, and the columns are concatenated left to right.

mod columns;
mod lines;

pub use columns::{assign_to_columns, resolve_columns, Column};
pub use lines::{assemble_text, group_lines, Line};

use crate::model::PageTokens;

/// Tunable thresholds for layout analysis, in layout units.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Minimum gutter width for a column split
    pub gap_threshold: f32,

    /// Maximum `top` difference for tokens on the same line
    pub line_tolerance: f32,

    /// Vertical step, relative to average line spacing, that starts a new
    /// paragraph (0 = never)
    pub paragraph_gap_ratio: f32,

    /// Upper bound on columns per page
    pub max_columns: usize,
}

impl LayoutConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gutter width threshold.
    pub fn with_gap_threshold(mut self, threshold: f32) -> Self {
        self.gap_threshold = threshold;
        self
    }

    /// Set the same-line tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the paragraph gap ratio.
    pub fn with_paragraph_gap_ratio(mut self, ratio: f32) -> Self {
        self.paragraph_gap_ratio = ratio;
        self
    }

    /// Set the maximum number of columns (at least 1).
    pub fn with_max_columns(mut self, max: usize) -> Self {
        self.max_columns = max.max(1);
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap_threshold: 45.0,
            line_tolerance: 4.0,
            paragraph_gap_ratio: 1.5,
            max_columns: 2,
        }
    }
}

/// Layout analyzer turning a page of tokens into reading-order lines.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    config: LayoutConfig,
}

impl LayoutAnalyzer {
    /// Create a new layout analyzer.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get the analyzer configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lines of a page in reading order: column 0 top to bottom, then
    /// column 1, and so on. A page without tokens yields no lines.
    pub fn page_lines(&self, page: PageTokens) -> Vec<Line> {
        let width = page.effective_width();
        let columns = resolve_columns(&page.tokens, width, &self.config);
        if columns.is_empty() {
            log::debug!("Page {} has no tokens", page.number);
            return vec![];
        }

        let lines: Vec<Line> = assign_to_columns(page.tokens, &columns)
            .into_iter()
            .enumerate()
            .flat_map(|(index, tokens)| group_lines(tokens, index, self.config.line_tolerance))
            .collect();

        log::debug!(
            "Page {}: {} columns, {} lines",
            page.number,
            columns.len(),
            lines.len()
        );
        lines
    }

    /// Join lines into page text with paragraph breaks.
    pub fn page_text(&self, lines: &[Line]) -> String {
        assemble_text(lines, self.config.paragraph_gap_ratio)
    }
}
