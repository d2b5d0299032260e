//! Data model shared by the extraction pipeline.
//!
//! Tokens come in from a rendering backend, blocks go out to the renderers.
//! Everything here is created per request and owned by the pipeline stage
//! that holds it.

mod block;
mod token;

pub use block::{Block, PageResult};
pub use token::{PageTokens, Token};
