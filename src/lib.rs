//! # pagedown
//!
//! Layout-aware Markdown extraction from positioned page text.
//!
//! A page renderer delivers words with their horizontal extent and vertical
//! position. This library rebuilds reading order across multi-column
//! layouts, repairs hyphenated and split words, drops running headers and
//! footers, and classifies the remaining text into headings, list items and
//! paragraphs before rendering Markdown.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagedown::{to_markdown, JsonSource};
//!
//! fn main() -> pagedown::Result<()> {
//!     // Load a token dump produced by a page renderer
//!     let source = JsonSource::from_path("tokens.json")?;
//!
//!     // Convert every page to Markdown
//!     let markdown = to_markdown(&source)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Column detection**: two-column pages read left column first
//! - **Structure recovery**: headings, lists and paragraphs
//! - **Boilerplate removal**: repeated footers and page stamps
//! - **Parallel processing**: uses Rayon across pages
//! - **Fallback chains**: try several extraction backends in order

pub mod backend;
pub mod error;
pub mod extract;
pub mod layout;
pub mod model;
pub mod render;
pub mod source;
pub mod structure;

// Re-export commonly used types
pub use backend::{BackendChain, DirectMarkdown, ExtractionBackend, MarkdownSource, TokenPipeline};
pub use error::{Error, Result};
pub use extract::{ExtractionOptions, Extractor, PageRange};
pub use layout::{Column, LayoutAnalyzer, LayoutConfig, Line};
pub use model::{Block, PageResult, PageTokens, Token};
pub use render::{Extraction, ExtractionStats, JsonFormat};
pub use source::{JsonSource, MemorySource, TokenSource};
pub use structure::{BoilerplateConfig, BoilerplateSet, Classifier, NormalizeOptions, Normalizer};

use std::path::Path;

/// Extract a page range with default options.
///
/// # Example
///
/// ```
/// use pagedown::{extract, MemorySource, PageRange, PageTokens, Token};
///
/// let source = MemorySource::new(vec![PageTokens::new(
///     1,
///     612.0,
///     vec![Token::new("SUMMARY", 72.0, 130.0, 72.0)],
/// )]);
/// let result = extract(&source, PageRange::all()).unwrap();
/// assert_eq!(result.markdown, "## Page 1\n\n### SUMMARY");
/// ```
pub fn extract<S: TokenSource + ?Sized>(source: &S, range: PageRange) -> Result<Extraction> {
    Extractor::default().extract(source, range)
}

/// Extract a page range with custom options.
pub fn extract_with_options<S: TokenSource + ?Sized>(
    source: &S,
    range: PageRange,
    options: ExtractionOptions,
) -> Result<Extraction> {
    Extractor::new(options).extract(source, range)
}

/// Convert every page of a source to Markdown.
pub fn to_markdown<S: TokenSource + ?Sized>(source: &S) -> Result<String> {
    Ok(extract(source, PageRange::all())?.markdown)
}

/// Convert every page of a source to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use pagedown::{to_markdown_with_options, ExtractionOptions, JsonSource};
///
/// let source = JsonSource::from_path("tokens.json").unwrap();
/// let options = ExtractionOptions::new()
///     .with_page_numbers(false)
///     .with_page_breaks(false);
/// let markdown = to_markdown_with_options(&source, options).unwrap();
/// ```
pub fn to_markdown_with_options<S: TokenSource + ?Sized>(
    source: &S,
    options: ExtractionOptions,
) -> Result<String> {
    Ok(extract_with_options(source, PageRange::all(), options)?.markdown)
}

/// Load a JSON token dump and extract a page range.
///
/// # Example
///
/// ```no_run
/// use pagedown::{extract_file, PageRange};
///
/// let result = extract_file("tokens.json", PageRange::new(3, 7)).unwrap();
/// std::fs::write("output.md", result.markdown).unwrap();
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P, range: PageRange) -> Result<Extraction> {
    let source = JsonSource::from_path(path)?;
    extract(&source, range)
}

/// Load a JSON token dump and render the extraction as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let extraction = extract_file(path, PageRange::all())?;
    render::to_json(&extraction, format)
}
