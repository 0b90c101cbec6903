use thiserror::Error;

use crate::widget::{WidgetId, WidgetKind};

/// Widget construction and lookup failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("widget size must be positive, got {width}x{height}")]
    NonPositiveSize { width: f32, height: f32 },

    #[error("unknown widget '{0}'")]
    UnknownWidget(String),

    #[error("widget name '{0}' is already taken")]
    DuplicateName(String),

    #[error("widget {id:?} is not a {expected:?}")]
    NotA { id: WidgetId, expected: WidgetKind },
}

/// Text layout failures. All of these are caller mistakes or static sizing
/// decisions made too small.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextError {
    #[error("character {0:?} is outside the glyph atlas range")]
    UnsupportedChar(char),

    #[error("atlas {width}x{height} does not divide into {columns}x{rows} cells")]
    AtlasNotDivisible {
        width: u32,
        height: u32,
        columns: u32,
        rows: u32,
    },

    #[error("{chars} characters do not fit in {cells} atlas cells")]
    GridTooSmall { chars: u32, cells: u32 },

    #[error("glyph index pool exhausted: {requested} quads requested, capacity {capacity}")]
    GlyphPoolExhausted { requested: u32, capacity: u32 },

    #[error("text vertex buffer too small: {required} vertices needed, capacity {capacity}")]
    TextVertexCapacity { required: u32, capacity: u32 },

    #[error("unknown text {0}")]
    UnknownText(usize),
}

/// Errors surfaced by [`Editor`](crate::editor::Editor).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("frame buffer '{buffer}' holds {capacity} elements, editor needs {required}")]
    FrameCapacity {
        buffer: &'static str,
        required: usize,
        capacity: usize,
    },
}
