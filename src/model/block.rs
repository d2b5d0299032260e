//! Classified content blocks and per-page results.

use serde::{Deserialize, Serialize};

/// One classified unit of output content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading line
    Heading {
        /// Markdown heading level (1-6)
        level: u8,
        /// Heading text
        text: String,
    },

    /// A list entry, marker included as it appeared on the page
    ListItem {
        /// Item text with its marker
        text: String,
    },

    /// A paragraph of running text
    Paragraph {
        /// Paragraph text, wrapped lines joined by single spaces
        text: String,
    },
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// Create a list item block.
    pub fn list_item(text: impl Into<String>) -> Self {
        Block::ListItem { text: text.into() }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Text content of the block.
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. } | Block::ListItem { text } | Block::Paragraph { text } => {
                text
            }
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem { .. })
    }
}

/// Blocks of one page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Content blocks on the page
    pub blocks: Vec<Block>,
}

impl PageResult {
    /// Create a page result.
    pub fn new(page_number: u32, blocks: Vec<Block>) -> Self {
        Self {
            page_number,
            blocks,
        }
    }

    /// Create a page with no content.
    pub fn empty(page_number: u32) -> Self {
        Self::new(page_number, Vec::new())
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text of the page, blocks separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_accessors() {
        let heading = Block::heading(3, "INTRODUCTION");
        assert!(heading.is_heading());
        assert_eq!(heading.text(), "INTRODUCTION");

        let item = Block::list_item("- First");
        assert!(item.is_list_item());
        assert!(!Block::paragraph("Body").is_list_item());
    }

    #[test]
    fn test_block_serde_tag() {
        let json = serde_json::to_string(&Block::heading(2, "Title")).unwrap();
        assert_eq!(json, r#"{"type":"heading","level":2,"text":"Title"}"#);

        let back: Block = serde_json::from_str(r#"{"type":"list_item","text":"- a"}"#).unwrap();
        assert_eq!(back, Block::list_item("- a"));
    }

    #[test]
    fn test_page_plain_text() {
        let page = PageResult::new(
            1,
            vec![Block::heading(3, "Title"), Block::paragraph("Body text.")],
        );
        assert_eq!(page.plain_text(), "Title\n\nBody text.");
        assert!(PageResult::empty(2).is_empty());
    }
}
