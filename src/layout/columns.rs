//! Column detection from the horizontal distribution of tokens.

use std::cmp::Ordering;

use crate::model::Token;

use super::LayoutConfig;

/// A detected column in the page layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column index (0 = leftmost)
    pub index: usize,
    /// Left boundary X coordinate
    pub x_min: f32,
    /// Right boundary X coordinate
    pub x_max: f32,
}

impl Column {
    /// Create a column.
    pub fn new(index: usize, x_min: f32, x_max: f32) -> Self {
        Self {
            index,
            x_min,
            x_max,
        }
    }

    /// Check if an X coordinate falls within this column.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    /// Horizontal center of the column.
    pub fn center(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }
}

/// An uncovered horizontal stretch between token spans, in rounded units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Gap {
    start: i64,
    end: i64,
}

impl Gap {
    fn width(&self) -> i64 {
        self.end - self.start
    }

    fn center(&self) -> f32 {
        (self.start + self.end) as f32 / 2.0
    }
}

/// Detect reading columns on a page.
///
/// Token boundaries are rounded to whole units and merged into covered
/// spans; the stretches between spans are the candidate gutters. A gutter
/// only counts when it is wider than `gap_threshold` and centered in the
/// middle half of the page, so word spacing and margins never split a page.
/// Columns are returned left to right; an empty slice yields no columns.
pub fn resolve_columns(tokens: &[Token], page_width: f32, config: &LayoutConfig) -> Vec<Column> {
    let spans = rounded_spans(tokens);
    let (Some(min_x), Some(max_x)) = (
        spans.iter().map(|s| s.0).min(),
        spans.iter().map(|s| s.1).max(),
    ) else {
        return vec![];
    };

    let width = if page_width > 0.0 {
        page_width
    } else {
        max_x as f32
    };
    let band = (width * 0.25, width * 0.75);

    let mut gutters: Vec<Gap> = find_gaps(spans)
        .into_iter()
        .filter(|g| g.width() as f32 > config.gap_threshold)
        .filter(|g| g.center() >= band.0 && g.center() <= band.1)
        .collect();

    log::debug!(
        "Qualifying gutters: {:?}, page_width={:.1}",
        gutters
            .iter()
            .map(|g| (g.start, g.end))
            .collect::<Vec<_>>(),
        width
    );

    // Widest first; the limit keeps the default at a single left/right split
    gutters.sort_by(|a, b| b.width().cmp(&a.width()).then(a.start.cmp(&b.start)));
    gutters.truncate(config.max_columns.max(1) - 1);
    gutters.sort_by_key(|g| g.start);

    let mut columns = Vec::with_capacity(gutters.len() + 1);
    let mut left = min_x;
    for gutter in &gutters {
        columns.push(Column::new(columns.len(), left as f32, gutter.start as f32));
        left = gutter.end;
    }
    columns.push(Column::new(columns.len(), left as f32, max_x as f32));

    log::debug!("Detected {} columns", columns.len());
    columns
}

/// Distribute tokens over columns, preserving their relative order.
///
/// A token goes to the column containing its horizontal center, or else to
/// the column whose center is nearest. No token is dropped.
pub fn assign_to_columns(tokens: Vec<Token>, columns: &[Column]) -> Vec<Vec<Token>> {
    let mut buckets: Vec<Vec<Token>> = vec![Vec::new(); columns.len()];
    if columns.is_empty() {
        return buckets;
    }

    for token in tokens {
        let center = token.center_x();
        let index = columns
            .iter()
            .position(|c| c.contains(center))
            .or_else(|| {
                columns
                    .iter()
                    .min_by(|a, b| {
                        let da = (a.center() - center).abs();
                        let db = (b.center() - center).abs();
                        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
                    })
                    .map(|c| c.index)
            })
            .unwrap_or(0);
        buckets[index].push(token);
    }

    log::debug!(
        "Tokens per column: {:?}",
        buckets.iter().map(|v| v.len()).collect::<Vec<_>>()
    );
    buckets
}

fn rounded_spans(tokens: &[Token]) -> Vec<(i64, i64)> {
    tokens
        .iter()
        .filter(|t| !t.is_blank())
        .map(|t| {
            let a = t.x0.round() as i64;
            let b = t.x1.round() as i64;
            (a.min(b), a.max(b))
        })
        .collect()
}

fn find_gaps(mut spans: Vec<(i64, i64)>) -> Vec<Gap> {
    spans.sort_unstable();

    let mut gaps = Vec::new();
    let mut covered_to: Option<i64> = None;
    for (start, end) in spans {
        match covered_to {
            Some(edge) if start > edge => {
                gaps.push(Gap { start: edge, end: start });
                covered_to = Some(end);
            }
            Some(edge) => covered_to = Some(edge.max(end)),
            None => covered_to = Some(end),
        }
    }
    gaps
}
