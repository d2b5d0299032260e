//! Text normalization: whitespace, hyphenation and split-word repair.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::classify::is_list_item;

static RE_HSPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());
static RE_NEWLINE_PADDING: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\n *").unwrap());
static RE_HYPHEN_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{L})-[ \n](\p{Ll})").unwrap());
static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),  // ﬀ
    ("\u{FB01}", "fi"),  // ﬁ
    ("\u{FB02}", "fl"),  // ﬂ
    ("\u{FB03}", "ffi"), // ﬃ
    ("\u{FB04}", "ffl"), // ﬄ
    ("\u{FB05}", "st"),  // ﬅ (long s + t)
    ("\u{FB06}", "st"),  // ﬆ
];

/// Options for text normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Join lowercase fragments split across a line break ("experi\nence").
    ///
    /// This cannot tell a broken word from two short words that happened
    /// to wrap, so it occasionally merges words that belong apart. Lines of
    /// a list item are never joined this way.
    pub rejoin_lowercase_splits: bool,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable lowercase split rejoining.
    pub fn with_lowercase_rejoin(mut self, enabled: bool) -> Self {
        self.rejoin_lowercase_splits = enabled;
        self
    }

    /// Enable or disable Unicode normalization and ligature expansion.
    pub fn with_unicode(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self.fix_ligatures = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            rejoin_lowercase_splits: true,
        }
    }
}

/// Page text normalizer.
///
/// Applying it to its own output returns the output unchanged.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a new normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Normalize multi-line page text.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        // Whitespace: single spaces inside lines, nothing around line breaks
        result = RE_HSPACE.replace_all(&result, " ").into_owned();
        result = RE_NEWLINE_PADDING.replace_all(&result, "\n").into_owned();

        // "infor-\nmation" and "infor- mation" -> "information"
        result = replace_until_stable(&RE_HYPHEN_BREAK, result);

        if self.options.rejoin_lowercase_splits {
            result = rejoin_lowercase_splits(&result);
        }

        result = RE_BLANK_RUN.replace_all(&result, "\n\n").into_owned();

        result.trim().to_string()
    }
}

/// Normalize text with default options.
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}

/// Join a line ending in a lowercase letter with a following line that
/// starts with one.
///
/// Inside a list item (from its marker line up to the next blank line) the
/// lines are continuations and are left for the classifier to join with a
/// space.
fn rejoin_lowercase_splits(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in text.split('\n') {
        if line.is_empty() {
            in_list = false;
        } else if is_list_item(line) {
            in_list = true;
        }

        if let Some(prev) = lines.last_mut() {
            let splits = !in_list
                && prev.chars().next_back().is_some_and(char::is_lowercase)
                && line.chars().next().is_some_and(char::is_lowercase);
            if splits {
                prev.push_str(line);
                continue;
            }
        }
        lines.push(line.to_string());
    }

    lines.join("\n")
}

/// Join the two captured letters until no match is left.
///
/// A single pass misses chains such as "a-\nb-\nc" because matches may not
/// overlap.
fn replace_until_stable(re: &Regex, mut text: String) -> String {
    loop {
        let next = re.replace_all(&text, "${1}${2}");
        if next == text {
            return text;
        }
        text = next.into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenation_fix() {
        assert_eq!(normalize("Play-\ning"), "Playing");
        assert_eq!(normalize("dun- geon"), "dungeon");
        assert_eq!(normalize("This is infor-  \n  mation."), "This is information.");
    }

    #[test]
    fn test_hyphen_chain() {
        assert_eq!(normalize("a-\nb-\nc"), "abc");
    }

    #[test]
    fn test_compound_words_keep_hyphen() {
        assert_eq!(normalize("a well-known fact"), "a well-known fact");
        // Capitalized continuation is a new word, not a split
        assert_eq!(normalize("Jean- Paul"), "Jean- Paul");
    }

    #[test]
    fn test_lowercase_split_rejoined() {
        assert_eq!(normalize("the experi\nence counts"), "the experience counts");
        // No rejoin across a capital or a blank line
        assert_eq!(normalize("end\nNext"), "end\nNext");
        assert_eq!(normalize("end\n\nnext"), "end\n\nnext");
    }

    #[test]
    fn test_list_lines_not_rejoined() {
        assert_eq!(
            normalize("- First item\n  continues here\nand ends here"),
            "- First item\ncontinues here\nand ends here"
        );
        assert_eq!(normalize("1. step one\ngoes on"), "1. step one\ngoes on");
        // The list ends at a blank line
        assert_eq!(normalize("- item\n\nthe experi\nence"), "- item\n\nthe experience");
    }

    #[test]
    fn test_lowercase_split_can_be_disabled() {
        let normalizer = Normalizer::new(NormalizeOptions::new().with_lowercase_rejoin(false));
        assert_eq!(normalizer.normalize("the\nquick"), "the\nquick");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("  too    many\t\tspaces  "), "too many spaces");
        assert_eq!(normalize("Line one.   \n   Line two."), "Line one.\nLine two.");
    }

    #[test]
    fn test_blank_lines_collapse() {
        assert_eq!(normalize("One.\n\n\n\nTwo.\n \n \nThree."), "One.\n\nTwo.\n\nThree.");
    }

    #[test]
    fn test_ligature_fix() {
        assert_eq!(normalize("ﬁnding ﬂowers"), "finding flowers");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "INTRODUCTION\n\nThe experi-\nment  was a suc- cess.\n\n\n\
             - First item\n  continues here",
            "a-\nb-\nc d\ne\n\n\n\nTitle",
            "  Café ﬁle\t\n\n  ",
            "- item one\nwraps here\nagain\n\nplain\ntext",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
