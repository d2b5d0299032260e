//! Extraction options and page ranges.

use crate::error::{Error, Result};
use crate::layout::LayoutConfig;
use crate::structure::{BoilerplateConfig, NormalizeOptions};

/// Options controlling a single extraction request.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Start each page with a `## Page <n>` heading
    pub include_page_numbers: bool,

    /// Put a `---` rule between pages
    pub include_page_breaks: bool,

    /// Drop running headers and footers repeated across pages
    pub filter_headers_footers: bool,

    /// Detect headings (when false, only lists and paragraphs are produced)
    pub preserve_formatting: bool,

    /// Markdown level for detected headings (1-6)
    pub heading_level: u8,

    /// Process pages in parallel
    pub parallel: bool,

    /// Escape Markdown-significant characters in text
    pub escape_special_chars: bool,

    /// Column and line thresholds
    pub layout: LayoutConfig,

    /// Header/footer detection thresholds
    pub boilerplate: BoilerplateConfig,

    /// Text normalization switches
    pub normalize: NormalizeOptions,
}

impl ExtractionOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable `## Page <n>` headers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.include_page_numbers = enabled;
        self
    }

    /// Enable or disable rules between pages.
    pub fn with_page_breaks(mut self, enabled: bool) -> Self {
        self.include_page_breaks = enabled;
        self
    }

    /// Enable or disable header/footer filtering.
    pub fn with_header_footer_filter(mut self, enabled: bool) -> Self {
        self.filter_headers_footers = enabled;
        self
    }

    /// Enable or disable heading detection.
    pub fn with_formatting(mut self, enabled: bool) -> Self {
        self.preserve_formatting = enabled;
        self
    }

    /// Set the heading level (clamped to 1-6).
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// Process pages one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escape_special_chars(mut self, enabled: bool) -> Self {
        self.escape_special_chars = enabled;
        self
    }

    /// Set the layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the boilerplate configuration.
    pub fn with_boilerplate(mut self, boilerplate: BoilerplateConfig) -> Self {
        self.boilerplate = boilerplate;
        self
    }

    /// Set the normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            include_page_numbers: true,
            include_page_breaks: true,
            filter_headers_footers: true,
            preserve_formatting: true,
            heading_level: 3,
            parallel: true,
            escape_special_chars: false,
            layout: LayoutConfig::default(),
            boilerplate: BoilerplateConfig::default(),
            normalize: NormalizeOptions::default(),
        }
    }
}

/// Inclusive, 1-indexed page range.
///
/// An open end means "through the last page".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page
    pub start: u32,
    /// Last page, or `None` for the end of the document
    pub end: Option<u32>,
}

impl PageRange {
    /// Every page of the document.
    pub fn all() -> Self {
        Self {
            start: 1,
            end: None,
        }
    }

    /// Pages `start..=end`.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// A single page.
    pub fn single(page: u32) -> Self {
        Self::new(page, page)
    }

    /// Pages from `start` through the last page.
    #[allow(clippy::should_implement_trait)]
    pub fn from(start: u32) -> Self {
        Self { start, end: None }
    }

    /// Resolve against a document's page count.
    ///
    /// Fails with [`Error::InvalidRange`] unless
    /// `1 <= start <= end <= total`.
    pub fn resolve(&self, total: u32) -> Result<(u32, u32)> {
        let end = self.end.unwrap_or(total);
        if self.start == 0 || self.start > end || end > total {
            return Err(Error::InvalidRange {
                start: self.start,
                end,
                total,
            });
        }
        Ok((self.start, end))
    }

    /// Parse a range string.
    ///
    /// Accepts `"all"`, `"5"`, `"3-7"` and `"3-"`.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }

        let page = |p: &str| -> std::result::Result<u32, String> {
            p.trim()
                .parse()
                .map_err(|_| format!("Invalid page number: {:?}", p.trim()))
        };

        match s.split_once('-') {
            Some((start, end)) if end.trim().is_empty() => Ok(Self::from(page(start)?)),
            Some((start, end)) => Ok(Self::new(page(start)?, page(end)?)),
            None => Ok(Self::single(page(s)?)),
        }
    }
}

impl Default for PageRange {
    fn default() -> Self {
        Self::all()
    }
}
