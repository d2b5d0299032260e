//! Line classification and block assembly.
//!
//! Each normalized line is labelled (blank, heading, list item or text)
//! using one line of lookahead, then fed through a small state machine that
//! buffers paragraphs and lists and emits [`Block`]s when a buffer closes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Block;

static RE_LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[•*\-]\s+|\d+[.)]\s+)\S").unwrap());

/// Headings shorter than this many characters may be detected by position.
const SHORT_HEADING_CHARS: usize = 60;

/// Label assigned to a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line
    Blank,
    /// A heading line
    Heading,
    /// A bulleted or numbered list entry
    ListItem,
    /// Running text
    Text,
}

/// Block assembly state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum State {
    /// Nothing buffered
    #[default]
    Idle,
    /// Buffering the lines of a paragraph
    InParagraph(Vec<String>),
    /// Buffering list items
    InList(Vec<String>),
}

/// Advance the state machine by one classified line.
///
/// Returns the next state and the blocks completed by this line.
pub fn transition(
    state: State,
    kind: LineKind,
    text: &str,
    heading_level: u8,
) -> (State, Vec<Block>) {
    match (kind, state) {
        (LineKind::Blank, state) => (State::Idle, flush(state)),
        (LineKind::Heading, state) => {
            let mut blocks = flush(state);
            blocks.push(Block::heading(heading_level, text));
            (State::Idle, blocks)
        }
        (LineKind::ListItem, State::InList(mut items)) => {
            items.push(text.to_string());
            (State::InList(items), vec![])
        }
        (LineKind::ListItem, state) => (State::InList(vec![text.to_string()]), flush(state)),
        (LineKind::Text, State::InList(mut items)) => {
            if let Some(last) = items.last_mut() {
                last.push(' ');
                last.push_str(text);
            }
            (State::InList(items), vec![])
        }
        (LineKind::Text, State::InParagraph(mut lines)) => {
            lines.push(text.to_string());
            (State::InParagraph(lines), vec![])
        }
        (LineKind::Text, State::Idle) => (State::InParagraph(vec![text.to_string()]), vec![]),
    }
}

/// Emit whatever the state has buffered.
pub fn flush(state: State) -> Vec<Block> {
    match state {
        State::Idle => vec![],
        State::InParagraph(lines) => vec![Block::paragraph(lines.join(" "))],
        State::InList(items) => items.into_iter().map(Block::list_item).collect(),
    }
}

/// Check if a line starts with a bullet glyph or a decimal list marker.
pub fn is_list_item(line: &str) -> bool {
    RE_LIST_MARKER.is_match(line.trim())
}

/// Check if a line looks like a heading.
///
/// A line qualifies when it is all capitals (at least 3 characters, no
/// trailing period), or when it is short, capitalized, followed by a blank
/// line and does not end like a clause (`,` `;` `:`).
pub fn is_heading(line: &str, next: Option<&str>) -> bool {
    let line = line.trim();
    if is_caps_heading(line) {
        return true;
    }

    let chars = line.chars().count();
    let next_is_blank = next.is_some_and(|n| n.trim().is_empty());
    chars < SHORT_HEADING_CHARS
        && next_is_blank
        && line.chars().next().is_some_and(char::is_uppercase)
        && !line.ends_with([',', ';', ':'])
}

/// All capitals, at least 3 characters and no trailing period.
fn is_caps_heading(line: &str) -> bool {
    line.chars().count() >= 3 && is_all_caps(line) && !line.ends_with('.')
}

/// Has cased letters and every one of them is upper case.
fn is_all_caps(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Classifier turning normalized page text into blocks.
#[derive(Debug, Clone)]
pub struct Classifier {
    detect_headings: bool,
    heading_level: u8,
}

impl Classifier {
    /// Create a classifier.
    ///
    /// With `detect_headings` off every non-list line is paragraph text.
    pub fn new(detect_headings: bool, heading_level: u8) -> Self {
        Self {
            detect_headings,
            heading_level: heading_level.clamp(1, 6),
        }
    }

    /// Label a line given the line after it.
    pub fn line_kind(&self, line: &str, next: Option<&str>) -> LineKind {
        let line = line.trim();
        if line.is_empty() {
            LineKind::Blank
        } else if is_list_item(line) {
            LineKind::ListItem
        } else if self.detect_headings && is_heading(line, next) {
            LineKind::Heading
        } else {
            LineKind::Text
        }
    }

    /// Label a line given the assembly state before it.
    ///
    /// A short line ending an open paragraph is the paragraph's last line,
    /// so only the all-capitals rule can make it a heading there.
    fn line_kind_in(&self, state: &State, line: &str, next: Option<&str>) -> LineKind {
        match self.line_kind(line, next) {
            LineKind::Heading
                if matches!(state, State::InParagraph(_)) && !is_caps_heading(line) =>
            {
                LineKind::Text
            }
            kind => kind,
        }
    }

    /// Classify normalized page text.
    pub fn classify(&self, text: &str) -> Vec<Block> {
        let lines: Vec<&str> = text.lines().collect();
        self.classify_lines(&lines)
    }

    /// Classify a sequence of lines.
    pub fn classify_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut state = State::Idle;

        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref().trim();
            let next = lines.get(i + 1).map(AsRef::as_ref);
            let kind = self.line_kind_in(&state, line, next);

            let (next_state, emitted) = transition(state, kind, line, self.heading_level);
            state = next_state;
            blocks.extend(emitted);
        }

        blocks.extend(flush(state));
        blocks
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(true, 3)
    }
}
