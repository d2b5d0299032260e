//! End-to-end tests for the extraction pipeline.

use pagedown::error::{Error, Result};
use pagedown::{
    extract, extract_with_options, Block, ExtractionOptions, MemorySource, PageRange, PageTokens,
    Token, TokenSource,
};

const LINE_HEIGHT: f32 = 14.0;

/// Tokens for one line of words starting at `x0`.
fn words(text: &str, x0: f32, top: f32) -> Vec<Token> {
    let mut x = x0;
    text.split_whitespace()
        .map(|word| {
            let token = Token::new(word, x, x + 6.0 * word.chars().count() as f32, top);
            x = token.x1 + 4.0;
            token
        })
        .collect()
}

/// Single-column page with one line per entry.
fn page(lines: &[&str]) -> PageTokens {
    let tokens = lines
        .iter()
        .enumerate()
        .flat_map(|(i, text)| words(text, 72.0, 72.0 + i as f32 * LINE_HEIGHT))
        .collect();
    PageTokens::new(0, 612.0, tokens)
}

fn document(count: usize) -> MemorySource {
    MemorySource::new(
        (1..=count)
            .map(|i| {
                let body = format!("Text on page {}.", i);
                page(&[body.as_str()])
            })
            .collect(),
    )
}

// ==================== Page Range Tests ====================

#[test]
fn test_page_header_count_matches_range() {
    let source = document(10);
    let result = extract(&source, PageRange::new(3, 7)).unwrap();

    assert_eq!(result.markdown.matches("## Page ").count(), 5);
    assert!(result.markdown.starts_with("## Page 3"));
    assert!(result.markdown.contains("## Page 7"));
    assert!(!result.markdown.contains("## Page 8"));
    assert_eq!(result.pages.len(), 5);
    assert_eq!(result.stats.page_count, 5);
}

#[test]
fn test_reversed_range_rejected() {
    let source = document(10);
    let err = extract(&source, PageRange::new(5, 3)).unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidRange {
            start: 5,
            end: 3,
            total: 10
        }
    ));
}

#[test]
fn test_range_past_end_rejected() {
    let source = document(4);
    assert!(extract(&source, PageRange::new(2, 5)).unwrap_err().is_invalid_range());
    assert!(extract(&source, PageRange::from(0)).unwrap_err().is_invalid_range());
}

#[test]
fn test_open_range_runs_to_last_page() {
    let source = document(6);
    let result = extract(&source, PageRange::from(4)).unwrap();
    assert_eq!((result.start_page, result.end_page, result.total_pages), (4, 6, 6));
    assert_eq!(result.page_count(), 3);
}

#[test]
fn test_page_breaks_between_pages_only() {
    let source = document(3);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(result.markdown.matches("---").count(), 2);
    assert!(!result.markdown.ends_with("---"));
}

#[test]
fn test_empty_page_keeps_header() {
    let source = MemorySource::new(vec![PageTokens::empty(1, 612.0)]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(result.markdown, "## Page 1");
    assert!(result.pages[0].is_empty());
}

// ==================== Layout Tests ====================

#[test]
fn test_two_columns_read_left_first() {
    let mut tokens = Vec::new();
    tokens.extend(words("Alpha one.", 72.0, 100.0));
    tokens.extend(words("Beta one.", 330.0, 100.0));
    tokens.extend(words("Alpha two.", 72.0, 114.0));
    tokens.extend(words("Beta two.", 330.0, 114.0));
    let source = MemorySource::new(vec![PageTokens::new(1, 612.0, tokens)]);

    let markdown = extract(&source, PageRange::all()).unwrap().markdown;
    let position = |needle: &str| markdown.find(needle).unwrap();

    assert!(position("Alpha one.") < position("Alpha two."));
    assert!(position("Alpha two.") < position("Beta one."));
    assert!(position("Beta one.") < position("Beta two."));
}

#[test]
fn test_single_column_when_gap_is_off_center() {
    // Wide gap, but in the right margin area
    let mut tokens = words("Main text here with several more words to fill the line.", 72.0, 100.0);
    tokens.extend(words("Note", 540.0, 100.0));
    let source = MemorySource::new(vec![PageTokens::new(1, 612.0, tokens)]);

    let result = extract(&source, PageRange::all()).unwrap();
    assert_eq!(
        result.pages[0].blocks,
        vec![Block::paragraph(
            "Main text here with several more words to fill the line. Note"
        )]
    );
}

// ==================== Structure Tests ====================

#[test]
fn test_hyphenated_line_break_repaired() {
    let source = MemorySource::new(vec![page(&["The experi-", "ment worked."])]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(
        result.pages[0].blocks,
        vec![Block::paragraph("The experiment worked.")]
    );
}

#[test]
fn test_heading_and_list_structure() {
    let source = MemorySource::new(vec![page(&[
        "INTRODUCTION",
        "Body text starts here.",
        "- First item,",
        "continues here.",
        "- Second item.",
    ])]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(
        result.pages[0].blocks,
        vec![
            Block::heading(3, "INTRODUCTION"),
            Block::paragraph("Body text starts here."),
            Block::list_item("- First item, continues here."),
            Block::list_item("- Second item."),
        ]
    );
    assert!(result
        .markdown
        .contains("- First item, continues here.\n- Second item."));
}

#[test]
fn test_list_continuation_joined_with_space() {
    let source = MemorySource::new(vec![page(&["- First item", "  continues here", ""])]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(
        result.pages[0].blocks,
        vec![Block::list_item("- First item continues here")]
    );
    assert_eq!(result.markdown, "## Page 1\n\n- First item continues here");
}

#[test]
fn test_list_continuation_over_several_lines() {
    let source = MemorySource::new(vec![page(&[
        "- alpha item",
        "wraps once",
        "and again",
        "- beta item",
    ])]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(
        result.pages[0].blocks,
        vec![
            Block::list_item("- alpha item wraps once and again"),
            Block::list_item("- beta item"),
        ]
    );
}

#[test]
fn test_section_gaps_with_mixed_sizes() {
    let mut tokens = Vec::new();
    for (text, top) in [
        ("Background", 100.0),
        ("Body line one", 130.0),
        ("Body line two", 142.0),
        ("Results", 202.0),
        ("Tail text", 242.0),
    ] {
        tokens.extend(words(text, 72.0, top));
    }
    let source = MemorySource::new(vec![PageTokens::new(1, 612.0, tokens)]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(
        result.pages[0].blocks,
        vec![
            Block::heading(3, "Background"),
            Block::paragraph("Body line one Body line two"),
            Block::heading(3, "Results"),
            Block::paragraph("Tail text"),
        ]
    );
}

#[test]
fn test_word_count_excludes_page_markup() {
    let source = document(3);
    let result = extract(&source, PageRange::all()).unwrap();

    // "Text on page N." on each page
    assert_eq!(result.stats.word_count, 12);
}

#[test]
fn test_empty_page_without_numbers_adds_no_rules() {
    let source = MemorySource::new(vec![
        page(&["Opening words."]),
        PageTokens::empty(0, 612.0),
        page(&["Closing words."]),
    ]);
    let options = ExtractionOptions::new().with_page_numbers(false);
    let result = extract_with_options(&source, PageRange::all(), options).unwrap();

    assert_eq!(result.markdown, "Opening words.\n\n---\n\nClosing words.");
}

#[test]
fn test_plain_mode_skips_headings() {
    let source = MemorySource::new(vec![page(&["INTRODUCTION"])]);
    let options = ExtractionOptions::new().with_formatting(false);
    let result = extract_with_options(&source, PageRange::all(), options).unwrap();

    assert_eq!(result.pages[0].blocks, vec![Block::paragraph("INTRODUCTION")]);
    assert!(!result.markdown.contains("###"));
}

// ==================== Boilerplate Tests ====================

fn footer_document(footer: &str, footer_pages: &[usize]) -> MemorySource {
    MemorySource::new(
        (1..=5)
            .map(|i| {
                let body = format!("Findings for page {}.", i);
                if footer_pages.contains(&i) {
                    page(&[body.as_str(), footer])
                } else {
                    page(&[body.as_str()])
                }
            })
            .collect(),
    )
}

#[test]
fn test_footer_on_four_of_five_pages_removed() {
    let source = footer_document("Confidential", &[1, 2, 3, 5]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert!(!result.markdown.contains("Confidential"));
    assert_eq!(result.stats.boilerplate_lines_removed, 4);
    for i in 1..=5 {
        assert!(result.markdown.contains(&format!("Findings for page {}.", i)));
    }
}

#[test]
fn test_footer_on_two_of_five_pages_kept() {
    let source = footer_document("Confidential", &[2, 4]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert_eq!(result.markdown.matches("Confidential").count(), 2);
}

#[test]
fn test_footer_kept_when_filter_disabled() {
    let source = footer_document("Confidential", &[1, 2, 3, 4, 5]);
    let options = ExtractionOptions::new().with_header_footer_filter(false);
    let result = extract_with_options(&source, PageRange::all(), options).unwrap();

    assert_eq!(result.markdown.matches("Confidential").count(), 5);
    assert_eq!(result.stats.boilerplate_lines_removed, 0);
}

#[test]
fn test_boilerplate_counted_within_range_only() {
    // Footer on pages 1-3 only; a range of 3-5 sees it once
    let source = footer_document("Confidential", &[1, 2, 3]);
    let result = extract(&source, PageRange::new(3, 5)).unwrap();

    assert!(result.markdown.contains("Confidential"));
}

#[test]
fn test_page_stamps_removed() {
    let source = MemorySource::new(vec![page(&["Short report.", "Page 1 of 2"])]);
    let result = extract(&source, PageRange::all()).unwrap();

    assert!(!result.markdown.contains("of 2"));
}

// ==================== Execution Tests ====================

#[test]
fn test_parallel_and_sequential_agree() {
    let source = footer_document("Internal use only", &[1, 2, 3, 4, 5]);

    let parallel = extract(&source, PageRange::all()).unwrap();
    let sequential = extract_with_options(
        &source,
        PageRange::all(),
        ExtractionOptions::new().sequential(),
    )
    .unwrap();

    assert_eq!(parallel.markdown, sequential.markdown);
    assert_eq!(parallel.pages, sequential.pages);
    assert_eq!(parallel.stats, sequential.stats);
}

/// Source that fails on one page.
struct FlakySource {
    inner: MemorySource,
    broken_page: u32,
}

impl TokenSource for FlakySource {
    fn page_count(&self) -> u32 {
        self.inner.page_count()
    }

    fn page(&self, number: u32) -> Result<PageTokens> {
        if number == self.broken_page {
            return Err(Error::Other("renderer crashed".to_string()));
        }
        self.inner.page(number)
    }
}

#[test]
fn test_source_failure_names_page() {
    let source = FlakySource {
        inner: document(5),
        broken_page: 3,
    };

    match extract(&source, PageRange::all()) {
        Err(Error::Extraction { page, source }) => {
            assert_eq!(page, 3);
            assert!(source.to_string().contains("renderer crashed"));
        }
        other => panic!("expected extraction error, got {:?}", other.map(|r| r.markdown)),
    }

    // Pages outside the broken one still extract
    assert!(extract(&source, PageRange::new(4, 5)).is_ok());
}
