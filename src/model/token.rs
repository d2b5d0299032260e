//! Positioned text tokens as delivered by a rendering backend.

use serde::{Deserialize, Serialize};

/// The smallest unit of positioned text (usually one word).
///
/// Coordinates follow the renderer's top-down convention: `top` grows
/// towards the bottom of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub top: f32,
}

impl Token {
    /// Create a new token.
    pub fn new(text: impl Into<String>, x0: f32, x1: f32, top: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
        }
    }

    /// Horizontal center of the token.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Whether the token carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// All tokens of a single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageTokens {
    /// Page number (1-indexed). Zero means "assign from position".
    #[serde(default)]
    pub number: u32,

    /// Page width in layout units
    #[serde(default)]
    pub width: f32,

    /// Tokens in renderer order
    #[serde(default, alias = "words")]
    pub tokens: Vec<Token>,
}

impl PageTokens {
    /// Create a new page.
    pub fn new(number: u32, width: f32, tokens: Vec<Token>) -> Self {
        Self {
            number,
            width,
            tokens,
        }
    }

    /// Create an empty page with the given width.
    pub fn empty(number: u32, width: f32) -> Self {
        Self::new(number, width, Vec::new())
    }

    /// Append a token.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Check if the page has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Effective page width: the declared width, or the rightmost token
    /// edge when the renderer did not report one.
    pub fn effective_width(&self) -> f32 {
        if self.width > 0.0 {
            return self.width;
        }
        self.tokens.iter().map(|t| t.x1).fold(0.0, f32::max)
    }
}
