//! JSON token dumps.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::PageTokens;

use super::TokenSource;

/// Accepted dump layouts: `{"pages": [...]}` or a bare array of pages.
#[derive(Deserialize)]
#[serde(untagged)]
enum Dump {
    Document { pages: Vec<PageTokens> },
    Pages(Vec<PageTokens>),
}

/// Token source loaded from a JSON dump.
///
/// Each page is an object with a `width` and a `tokens` (or `words`) array
/// of `{ "text", "x0", "x1", "top" }` records. Extra fields are ignored, so
/// word lists exported by common PDF tools load as-is.
#[derive(Debug, Clone)]
pub struct JsonSource {
    name: String,
    pages: Vec<PageTokens>,
}

impl JsonSource {
    /// Load a dump from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut source = Self::from_reader(BufReader::new(file))?;
        source.name = path.display().to_string();
        Ok(source)
    }

    /// Load a dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dump: Dump = serde_json::from_reader(reader)?;
        Ok(Self::from_dump(dump))
    }

    /// Load a dump from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let dump: Dump = serde_json::from_slice(data)?;
        Ok(Self::from_dump(dump))
    }

    /// Load a dump from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(data: &str) -> Result<Self> {
        Self::from_bytes(data.as_bytes())
    }

    fn from_dump(dump: Dump) -> Self {
        let pages = match dump {
            Dump::Document { pages } | Dump::Pages(pages) => pages,
        };

        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, mut page)| {
                page.number = i as u32 + 1;
                page
            })
            .collect::<Vec<_>>();

        log::debug!("Loaded token dump with {} pages", pages.len());
        Self {
            name: "json".to_string(),
            pages,
        }
    }
}

impl TokenSource for JsonSource {
    fn name(&self) -> &str {
        &self.name
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_layout() {
        let data = r#"{
            "pages": [
                {"width": 612, "tokens": [{"text": "Hello", "x0": 72, "x1": 100, "top": 90}]},
                {"width": 612, "tokens": []}
            ]
        }"#;
        let source = JsonSource::from_str(data).unwrap();
        assert_eq!(source.page_count(), 2);

        let page = source.page(1).unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.width, 612.0);
        assert_eq!(page.tokens[0].text, "Hello");
        assert!(source.page(2).unwrap().is_empty());
    }

    #[test]
    fn test_bare_array_with_words_and_extra_fields() {
        let data = r#"[
            {"width": 595.0, "words": [
                {"text": "Hi", "x0": 10.0, "x1": 20.0, "top": 5.0, "bottom": 15.0, "upright": true}
            ]}
        ]"#;
        let source = JsonSource::from_bytes(data.as_bytes()).unwrap();
        assert_eq!(source.page_count(), 1);
        assert_eq!(source.page(1).unwrap().tokens.len(), 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(JsonSource::from_str("{not json"), Err(Error::Json(_))));
        let empty = JsonSource::from_str("[]").unwrap();
        assert!(matches!(empty.page(1), Err(Error::PageOutOfRange(1, 0))));
    }
}
