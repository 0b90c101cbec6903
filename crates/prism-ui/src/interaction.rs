//! Pointer picking and per-kind click and scroll handling.
//!
//! [`InteractionState`] is owned by the caller and passed into every entry
//! point.

use prism_engine::coords::{Vec2, Viewport};

use crate::error::WidgetError;
use crate::widget::{WidgetArena, WidgetId, WidgetKind, WidgetVariant};

/// RGB shift applied to a scroll box when it gains focus, removed on release.
pub const FOCUS_COLOR_NUDGE: f32 = 0.3;

// ── InteractionState ──────────────────────────────────────────────────────

/// Which scroll box, if any, currently receives wheel input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    focused: Option<WidgetId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn focused_scroll_box(&self) -> Option<WidgetId> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    #[inline]
    pub fn delta(self) -> i64 {
        match self {
            ScrollDirection::Up => 1,
            ScrollDirection::Down => -1,
        }
    }

    /// Direction for a vertical wheel amount; `None` for zero.
    pub fn from_lines(lines: f32) -> Option<Self> {
        if lines > 0.0 {
            Some(ScrollDirection::Up)
        } else if lines < 0.0 {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Panel collapsed or expanded. `children` had their visibility written.
    PanelToggled {
        panel: WidgetId,
        collapsed: bool,
        children: Vec<WidgetId>,
    },
    Focused(WidgetId),
    Unfocused(WidgetId),
    /// Button fired its action.
    Action { button: WidgetId, action: String },
    /// Swallowed because a scroll box holds focus.
    Suppressed { target: WidgetId, focused: WidgetId },
}

impl ClickOutcome {
    /// Widgets whose quad changed and need their geometry rewritten.
    pub fn geometry_changed(&self) -> Option<WidgetId> {
        match self {
            ClickOutcome::PanelToggled { panel, .. } => Some(*panel),
            _ => None,
        }
    }
}

// ── picking ───────────────────────────────────────────────────────────────

/// Topmost visible widget under a screen-pixel position.
pub fn hit_test(
    arena: &WidgetArena,
    viewport: Viewport,
    screen_x: f32,
    screen_y: f32,
) -> Option<WidgetId> {
    if !viewport.is_valid() {
        return None;
    }
    hit_test_ndc(arena, viewport.screen_to_ndc(screen_x, screen_y))
}

/// Topmost visible widget containing `p`.
///
/// Highest depth wins. Among equal depths the earliest inserted widget wins.
pub fn hit_test_ndc(arena: &WidgetArena, p: Vec2) -> Option<WidgetId> {
    let mut best: Option<(WidgetId, u32)> = None;
    for (id, widget) in arena.iter() {
        if !widget.is_visible() || !widget.rect().contains(p) {
            continue;
        }
        match best {
            Some((_, depth)) if widget.depth() <= depth => {}
            _ => best = Some((id, widget.depth())),
        }
    }
    best.map(|(id, _)| id)
}

// ── dispatch ──────────────────────────────────────────────────────────────

/// Applies a click on `id` according to its kind.
///
/// - Panel: toggles collapse unless a scroll box is focused.
/// - Scroll box: focuses when nothing is focused, unfocuses when it is the
///   focused box, otherwise ignored.
/// - Button: reports its action unless a scroll box is focused.
pub fn dispatch_click(
    arena: &mut WidgetArena,
    state: &mut InteractionState,
    id: WidgetId,
) -> Result<ClickOutcome, WidgetError> {
    let widget = arena.get(id)?;
    let suppressed = |focused: WidgetId| ClickOutcome::Suppressed {
        target: id,
        focused,
    };

    match widget.variant() {
        WidgetVariant::Panel(panel) => {
            if let Some(focused) = state.focused {
                return Ok(suppressed(focused));
            }
            let collapse = !panel.is_collapsed();
            let children = arena.change_panel_size(id, collapse)?;
            Ok(ClickOutcome::PanelToggled {
                panel: id,
                collapsed: collapse,
                children,
            })
        }
        WidgetVariant::ScrollBox(_) => match state.focused {
            Some(focused) if focused == id => {
                let w = arena.get_mut(id)?;
                w.set_color(w.color().nudged(-FOCUS_COLOR_NUDGE));
                state.focused = None;
                log::debug!("scroll box '{}' released focus", w.name());
                Ok(ClickOutcome::Unfocused(id))
            }
            Some(focused) => Ok(suppressed(focused)),
            None => {
                let w = arena.get_mut(id)?;
                w.set_color(w.color().nudged(FOCUS_COLOR_NUDGE));
                state.focused = Some(id);
                log::debug!("scroll box '{}' took focus", w.name());
                Ok(ClickOutcome::Focused(id))
            }
        },
        WidgetVariant::Button(button) => {
            if let Some(focused) = state.focused {
                return Ok(suppressed(focused));
            }
            Ok(ClickOutcome::Action {
                button: id,
                action: button.action.clone(),
            })
        }
    }
}

/// Steps the focused scroll box by one. Returns the box and its new text.
pub fn on_scroll(
    arena: &mut WidgetArena,
    state: &InteractionState,
    direction: ScrollDirection,
) -> Result<Option<(WidgetId, String)>, WidgetError> {
    let Some(id) = state.focused else {
        return Ok(None);
    };
    match arena.get_mut(id)?.variant_mut() {
        WidgetVariant::ScrollBox(sb) => {
            let text = sb.change_scroll_value(direction.delta()).to_owned();
            Ok(Some((id, text)))
        }
        _ => Err(WidgetError::NotA {
            id,
            expected: WidgetKind::ScrollBox,
        }),
    }
}
