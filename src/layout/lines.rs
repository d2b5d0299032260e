//! Line grouping within a column and page text assembly.

use std::cmp::Ordering;

use crate::model::Token;

/// A text line within one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Column the line belongs to (0 = leftmost)
    pub column_index: usize,
    /// Top coordinate of the line's first token
    pub top: f32,
    /// Tokens joined left to right with single spaces
    pub text: String,
}

impl Line {
    /// Create a line.
    pub fn new(column_index: usize, top: f32, text: impl Into<String>) -> Self {
        Self {
            column_index,
            top,
            text: text.into(),
        }
    }
}

/// Group the tokens of one column into lines by vertical position.
///
/// A token joins the open line while its `top` is within `tolerance` of the
/// line's first token; exact ties stay on the open line. Lines come out in
/// ascending `top` order.
pub fn group_lines(mut tokens: Vec<Token>, column_index: usize, tolerance: f32) -> Vec<Line> {
    tokens.retain(|t| !t.is_blank());
    if tokens.is_empty() {
        return vec![];
    }

    tokens.sort_by(|a, b| {
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut current_top: Option<f32> = None;

    for token in tokens {
        match current_top {
            Some(top) if (token.top - top).abs() <= tolerance => current.push(token),
            _ => {
                if let Some(top) = current_top {
                    lines.push(assemble_line(std::mem::take(&mut current), column_index, top));
                }
                current_top = Some(token.top);
                current.push(token);
            }
        }
    }

    // Don't forget the last line
    if let Some(top) = current_top {
        lines.push(assemble_line(current, column_index, top));
    }

    lines
}

fn assemble_line(mut tokens: Vec<Token>, column_index: usize, top: f32) -> Line {
    tokens.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal));
    let text = tokens
        .iter()
        .map(|t| t.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    Line::new(column_index, top, text)
}

/// Join lines into page text, one line per row.
///
/// A blank line goes between columns and wherever the vertical step between
/// two lines of a column exceeds `paragraph_gap_ratio` times the typical
/// line spacing. A non-positive ratio disables spacing breaks.
pub fn assemble_text(lines: &[Line], paragraph_gap_ratio: f32) -> String {
    let spacing = typical_line_spacing(lines);
    let mut text = String::new();

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            let prev = &lines[i - 1];
            let breaks = if prev.column_index != line.column_index {
                true
            } else {
                paragraph_gap_ratio > 0.0
                    && spacing > 0.0
                    && line.top - prev.top > spacing * paragraph_gap_ratio
            };
            text.push('\n');
            if breaks {
                text.push('\n');
            }
        }
        text.push_str(&line.text);
    }

    text
}

/// Lower quartile of the vertical steps between consecutive lines of the
/// same column.
///
/// Section gaps are the large steps, so they stay above the quartile even
/// when a short page has more gaps than body lines.
fn typical_line_spacing(lines: &[Line]) -> f32 {
    let mut spacings: Vec<f32> = lines
        .windows(2)
        .filter(|w| w[0].column_index == w[1].column_index)
        .map(|w| w[1].top - w[0].top)
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 0.0;
    }

    spacings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    spacings[(spacings.len() - 1) / 4]
}
