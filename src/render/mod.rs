//! Rendering module for converting classified pages to output formats.

mod json;
mod markdown;
mod result;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use result::{Extraction, ExtractionStats};
