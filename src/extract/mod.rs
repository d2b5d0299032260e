//! Page orchestration: runs the pipeline over a page range.
//!
//! Extraction is two passes with a barrier in between. The first pass turns
//! every page's tokens into raw lines. The boilerplate set is then built from
//! all pages at once, and the second pass filters, normalizes and classifies
//! each page against it. Both passes may run page-parallel; results always
//! come back in page order.

mod options;

pub use options::{ExtractionOptions, PageRange};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::layout::{LayoutAnalyzer, Line};
use crate::model::PageResult;
use crate::render::{to_markdown, Extraction, ExtractionStats};
use crate::source::TokenSource;
use crate::structure::{BoilerplateSet, Classifier, Normalizer};

/// Runs the extraction pipeline with fixed options.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractionOptions,
}

impl Extractor {
    /// Create a new extractor.
    pub fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    /// Get the extraction options.
    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Extract a page range from a token source.
    ///
    /// The range is validated before any page is touched. A page the source
    /// fails to deliver aborts the whole request.
    pub fn extract<S>(&self, source: &S, range: PageRange) -> Result<Extraction>
    where
        S: TokenSource + ?Sized,
    {
        let total = source.page_count();
        let (start, end) = range.resolve(total)?;
        let numbers: Vec<u32> = (start..=end).collect();

        log::info!(
            "Extracting pages {}-{} of {} from {}",
            start,
            end,
            total,
            source.name()
        );

        // Pass 1: tokens -> raw lines
        let analyzer = LayoutAnalyzer::new(self.options.layout.clone());
        let raw_pages: Vec<(u32, Vec<Line>)> = self.map_pages(numbers, |number| {
            let mut page = source
                .page(number)
                .map_err(|e| Error::extraction(number, e))?;
            if page.number == 0 {
                page.number = number;
            }
            Ok((number, analyzer.page_lines(page)))
        })?;

        // Barrier: every page's lines are known before any page is classified
        let boilerplate = if self.options.filter_headers_footers {
            BoilerplateSet::detect(
                raw_pages.iter().map(|(_, lines)| lines.as_slice()),
                &self.options.boilerplate,
            )
        } else {
            BoilerplateSet::new()
        };
        log::debug!("{} distinct boilerplate lines", boilerplate.len());

        // Pass 2: filter -> text -> normalize -> classify
        let normalizer = Normalizer::new(self.options.normalize.clone());
        let classifier =
            Classifier::new(self.options.preserve_formatting, self.options.heading_level);
        let processed: Vec<(PageResult, usize)> =
            self.map_pages(raw_pages, |(number, mut lines)| {
                let removed = boilerplate.strip(&mut lines);
                let text = normalizer.normalize(&analyzer.page_text(&lines));
                let blocks = classifier.classify(&text);
                Ok((PageResult::new(number, blocks), removed))
            })?;

        let mut stats = ExtractionStats::new();
        let pages: Vec<PageResult> = processed
            .into_iter()
            .map(|(page, removed)| {
                stats.add_page_result(&page);
                stats.add_boilerplate(removed);
                stats.count_text(&page.plain_text());
                page
            })
            .collect();

        let markdown = to_markdown(&pages, &self.options);

        log::info!(
            "Extracted {} pages: {} headings, {} paragraphs, {} list items, \
             {} boilerplate lines removed",
            stats.page_count,
            stats.heading_count,
            stats.paragraph_count,
            stats.list_item_count,
            stats.boilerplate_lines_removed
        );

        Ok(Extraction {
            markdown,
            pages,
            start_page: start,
            end_page: end,
            total_pages: total,
            stats,
        })
    }

    /// Apply `f` to every item, in parallel when enabled, keeping order.
    ///
    /// On failure the error of the earliest failing item is returned.
    fn map_pages<T, U, F>(&self, items: Vec<T>, f: F) -> Result<Vec<U>>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> Result<U> + Sync + Send,
    {
        if self.options.parallel {
            let results: Vec<Result<U>> = items.into_par_iter().map(f).collect();
            results.into_iter().collect()
        } else {
            items.into_iter().map(f).collect()
        }
    }
}
