//! Prism UI: the editor overlay drawn on top of the scene.
//!
//! Widgets (panels, buttons, scroll boxes) live in a [`widget::WidgetArena`]
//! and are authored in NDC. Their quads are packed by
//! [`geometry::GeometryAggregate`], their labels laid out by
//! [`text::TextStore`] against a fixed glyph grid, and pointer input is routed
//! through [`interaction`]. [`Editor`] ties these together for a frame loop.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use prism_ui::prelude::*;
//!
//! let mut editor = Editor::with_default_gui(EditorConfig::default())?;
//!
//! // Each frame, after the ring advanced:
//! editor.handle_input(&input)?;
//! editor.update(ring.current_mut(), time.dt)?;
//! editor.submit_draws(&mut recorder);
//! for click in editor.drain_clicks() { /* ... */ }
//! ```

pub mod app;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod interaction;
pub mod text;
pub mod widget;

pub use app::{ActionCtx, Application, AtlasSource};
pub use editor::{Editor, EditorConfig, EditorInput};

/// Everything a host usually needs.
pub mod prelude {
    pub use crate::app::{ActionCtx, Application, AtlasSource};
    pub use crate::editor::{Editor, EditorConfig, EditorInput};
    pub use crate::error::{EditorError, TextError, WidgetError};
    pub use crate::event::WidgetClick;
    pub use crate::geometry::{GeometryAggregate, SubGeometry};
    pub use crate::interaction::{ClickOutcome, InteractionState, ScrollDirection};
    pub use crate::text::{FontConfig, MonoFont, Text, TextId, TextStore};
    pub use crate::widget::{Widget, WidgetArena, WidgetId, WidgetKind, WidgetVariant};

    pub use prism_engine::coords::{ColorRgba, NdcRect, Vec2, Viewport};
}
