//! Running header/footer detection across a page range.

use std::collections::{BTreeSet, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::layout::Line;

static RE_PAGE_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^page\s+\d+(?:\s+of\s+\d+)?$").unwrap());

/// Sampling and frequency thresholds for boilerplate detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoilerplateConfig {
    /// Lines sampled from the bottom of each page
    pub trailing_lines: usize,

    /// Lines sampled from the top of each page
    pub leading_lines: usize,

    /// Occurrences needed before a line counts as boilerplate
    pub min_occurrences: usize,

    /// Lines this long (in characters) or longer are never boilerplate
    pub max_len: usize,
}

impl BoilerplateConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also sample the first `count` lines of each page.
    pub fn with_leading_lines(mut self, count: usize) -> Self {
        self.leading_lines = count;
        self
    }

    /// Set how many bottom lines are sampled.
    pub fn with_trailing_lines(mut self, count: usize) -> Self {
        self.trailing_lines = count;
        self
    }

    /// Set the occurrence threshold.
    pub fn with_min_occurrences(mut self, count: usize) -> Self {
        self.min_occurrences = count;
        self
    }
}

impl Default for BoilerplateConfig {
    fn default() -> Self {
        Self {
            trailing_lines: 3,
            leading_lines: 0,
            min_occurrences: 3,
            max_len: 100,
        }
    }
}

/// Lines judged to be running headers or footers.
///
/// Built once per request from every page in the range, then applied
/// read-only to each page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoilerplateSet {
    lines: HashSet<String>,
}

impl BoilerplateSet {
    /// Create an empty set (nothing is filtered except page stamps).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set from the raw lines of every page in the range.
    pub fn detect<'a, I>(pages: I, config: &BoilerplateConfig) -> Self
    where
        I: IntoIterator<Item = &'a [Line]>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for lines in pages {
            let head = 0..config.leading_lines.min(lines.len());
            let tail = lines.len().saturating_sub(config.trailing_lines)..lines.len();
            let sampled: BTreeSet<usize> = head.chain(tail).collect();

            for index in sampled {
                let text = lines[index].text.trim();
                if !text.is_empty() {
                    *counts.entry(text).or_insert(0) += 1;
                }
            }
        }

        let lines: HashSet<String> = counts
            .into_iter()
            .filter(|(text, count)| {
                *count >= config.min_occurrences && text.chars().count() < config.max_len
            })
            .map(|(text, _)| text.to_string())
            .collect();

        log::debug!("Boilerplate lines: {:?}", lines);
        Self { lines }
    }

    /// Check if a line is boilerplate.
    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line.trim())
    }

    /// Number of distinct boilerplate lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop boilerplate lines and bare page stamps from a page.
    ///
    /// Returns the number of lines removed.
    pub fn strip(&self, lines: &mut Vec<Line>) -> usize {
        let before = lines.len();
        lines.retain(|line| !self.contains(&line.text) && !is_page_stamp(&line.text));
        before - lines.len()
    }
}

/// Check if a line is a bare page-number stamp ("Page 4", "Page 4 of 12").
pub fn is_page_stamp(line: &str) -> bool {
    RE_PAGE_STAMP.is_match(line.trim())
}
