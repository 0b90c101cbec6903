//! Glyph atlas sources.
//!
//! The overlay samples a single-channel, fixed-grid monospace atlas: one glyph
//! per cell, cells in character order starting at `first`.

mod atlas;

pub use atlas::{AtlasError, GridAtlas, GridLayout};
