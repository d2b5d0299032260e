//! Markdown rendering for classified pages.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::ExtractionOptions;
use crate::model::{Block, PageResult};

static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•*\-]\s+").unwrap());

/// Render pages to Markdown.
pub fn to_markdown(pages: &[PageResult], options: &ExtractionOptions) -> String {
    MarkdownRenderer::new(options).render(pages)
}

/// Markdown renderer.
pub struct MarkdownRenderer<'a> {
    options: &'a ExtractionOptions,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a new Markdown renderer.
    pub fn new(options: &'a ExtractionOptions) -> Self {
        Self { options }
    }

    /// Render pages in the order given.
    ///
    /// A page that renders to nothing gets no rule on either side.
    pub fn render(&self, pages: &[PageResult]) -> String {
        let mut output = String::new();

        for page in pages {
            let section = self.render_page(page);
            if section.is_empty() {
                continue;
            }
            if self.options.include_page_breaks && !output.is_empty() {
                output.push_str("---\n\n");
            }
            output.push_str(&section);
        }

        output.trim().to_string()
    }

    fn render_page(&self, page: &PageResult) -> String {
        let mut output = String::new();
        if self.options.include_page_numbers {
            output.push_str(&format!("## Page {}\n\n", page.page_number));
        }

        let mut in_list = false;
        for block in &page.blocks {
            let is_item = block.is_list_item();
            if in_list && !is_item {
                output.push('\n');
            }
            in_list = is_item;
            self.render_block(&mut output, block);
        }

        // Blank line after a list that closes the page
        if in_list {
            output.push('\n');
        }
        output
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Heading { level, text } => {
                output.push_str(&"#".repeat(*level as usize));
                output.push(' ');
                output.push_str(&self.escape(text));
                output.push_str("\n\n");
            }
            Block::ListItem { text } => {
                output.push_str(&self.list_item(text));
                output.push('\n');
            }
            Block::Paragraph { text } => {
                output.push_str(&self.escape(text));
                output.push_str("\n\n");
            }
        }
    }

    /// Bullet glyphs become "- "; numbered markers pass through.
    fn list_item(&self, text: &str) -> String {
        match RE_BULLET.find(text) {
            Some(marker) => format!("- {}", self.escape(&text[marker.end()..])),
            None => self.escape(text),
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only characters that could be misread as inline syntax are escaped, so
/// extracted text stays readable.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
