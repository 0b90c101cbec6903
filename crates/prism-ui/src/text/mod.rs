//! Fixed-advance glyph-grid text for widget labels.

mod font;
mod layout;
mod pool;

pub use font::{FontConfig, GlyphRect, MonoFont};
pub use layout::{ADVANCE_DIVISOR, HEIGHT_DIVISOR, Text, TextId, TextStore};
pub use pool::QuadIndexPool;
