mod arena;
mod button;
mod mesh;
mod panel;
mod scroll_box;

pub use arena::WidgetArena;
pub use button::ButtonState;
pub use mesh::{QUAD_INDICES, QuadMesh};
pub use panel::{DEFAULT_COLLAPSED_HEIGHT, PanelState};
pub use scroll_box::ScrollBoxState;

use prism_engine::coords::{ColorRgba, NdcRect};

use crate::error::WidgetError;
use crate::text::TextId;

/// Stable handle into a [`WidgetArena`]. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) usize);

impl WidgetId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Panel,
    Button,
    ScrollBox,
}

/// Per-kind state. Dispatch on this instead of a trait object.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetVariant {
    Panel(PanelState),
    Button(ButtonState),
    ScrollBox(ScrollBoxState),
}

impl WidgetVariant {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetVariant::Panel(_) => WidgetKind::Panel,
            WidgetVariant::Button(_) => WidgetKind::Button,
            WidgetVariant::ScrollBox(_) => WidgetKind::ScrollBox,
        }
    }
}

// ── Widget ────────────────────────────────────────────────────────────────

/// One clickable rectangle in the overlay.
///
/// Geometry lives in NDC with the rect origin at the top-left corner. The
/// color slot indexes the per-frame color array the shader reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    name: String,
    rect: NdcRect,
    color: ColorRgba,
    visible: bool,
    depth: u32,
    color_slot: usize,
    mesh: QuadMesh,
    label: Option<TextId>,
    parent: Option<WidgetId>,
    variant: WidgetVariant,
}

impl Widget {
    pub fn new(
        name: impl Into<String>,
        rect: NdcRect,
        color: ColorRgba,
        depth: u32,
        color_slot: usize,
        mut variant: WidgetVariant,
    ) -> Result<Self, WidgetError> {
        if rect.is_degenerate() {
            return Err(WidgetError::NonPositiveSize {
                width: rect.size.x,
                height: rect.size.y,
            });
        }
        if let WidgetVariant::Panel(panel) = &mut variant {
            let collapsed = panel.collapsed_height();
            if !(collapsed.is_finite() && collapsed > 0.0) {
                return Err(WidgetError::NonPositiveSize {
                    width: rect.size.x,
                    height: collapsed,
                });
            }
            panel.set_original_height(rect.size.y);
        }
        Ok(Self {
            name: name.into(),
            rect,
            color,
            visible: true,
            depth,
            color_slot,
            mesh: QuadMesh::from_rect(rect),
            label: None,
            parent: None,
            variant,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> WidgetKind {
        self.variant.kind()
    }

    #[inline]
    pub fn rect(&self) -> NdcRect {
        self.rect
    }

    #[inline]
    pub fn color(&self) -> ColorRgba {
        self.color
    }

    pub fn set_color(&mut self, color: ColorRgba) {
        self.color = color;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn color_slot(&self) -> usize {
        self.color_slot
    }

    #[inline]
    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    #[inline]
    pub fn label(&self) -> Option<TextId> {
        self.label
    }

    pub(crate) fn set_label(&mut self, label: TextId) {
        self.label = Some(label);
    }

    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: WidgetId) {
        self.parent = Some(parent);
    }

    #[inline]
    pub fn variant(&self) -> &WidgetVariant {
        &self.variant
    }

    pub fn as_panel(&self) -> Option<&PanelState> {
        match &self.variant {
            WidgetVariant::Panel(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&ButtonState> {
        match &self.variant {
            WidgetVariant::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_scroll_box(&self) -> Option<&ScrollBoxState> {
        match &self.variant {
            WidgetVariant::ScrollBox(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn variant_mut(&mut self) -> &mut WidgetVariant {
        &mut self.variant
    }

    /// Resizes vertically, keeping the top edge. Only the bottom two mesh
    /// vertices change.
    pub(crate) fn set_height(&mut self, height: f32) {
        self.rect = self.rect.with_height(height);
        self.mesh.set_bottom(self.rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> NdcRect {
        NdcRect::new(0.0, 0.5, 0.2, 0.1)
    }

    #[test]
    fn rejects_zero_width() {
        let err = Widget::new(
            "w",
            NdcRect::new(0.0, 0.0, 0.0, 0.1),
            ColorRgba::white(),
            1,
            0,
            WidgetVariant::Button(ButtonState::new("A")),
        )
        .unwrap_err();
        assert!(matches!(err, WidgetError::NonPositiveSize { .. }));
    }

    #[test]
    fn new_widget_is_visible_with_matching_mesh() {
        let w = Widget::new(
            "w",
            rect(),
            ColorRgba::white(),
            2,
            5,
            WidgetVariant::ScrollBox(ScrollBoxState::default()),
        )
        .unwrap();
        assert!(w.is_visible());
        assert_eq!(w.kind(), WidgetKind::ScrollBox);
        assert_eq!(w.color_slot(), 5);
        assert_eq!(*w.mesh(), QuadMesh::from_rect(rect()));
        assert!(w.as_panel().is_none());
    }

    #[test]
    fn set_height_moves_bottom_only() {
        let mut w = Widget::new(
            "p",
            rect(),
            ColorRgba::white(),
            1,
            0,
            WidgetVariant::Panel(PanelState::new()),
        )
        .unwrap();
        w.set_height(0.05);
        assert_eq!(w.rect().top(), 0.5);
        assert!((w.rect().bottom() - 0.45).abs() < 1e-6);
        assert_eq!(w.mesh().vertices()[1].position, [0.0, 0.5, 0.0]);
    }

    // ── panel heights ─────────────────────────────────────────────────────

    fn panel(rect: NdcRect, state: PanelState) -> Result<Widget, WidgetError> {
        Widget::new("p", rect, ColorRgba::white(), 1, 0, WidgetVariant::Panel(state))
    }

    #[test]
    fn panel_takes_expanded_height_from_rect() {
        let w = panel(NdcRect::new(0.0, 0.5, 0.2, 0.3), PanelState::new()).unwrap();
        assert_eq!(w.as_panel().map(|p| p.original_height()), Some(0.3));
    }

    #[test]
    fn panel_rejects_non_positive_collapsed_height() {
        for bad in [0.0, -0.4, f32::NAN, f32::INFINITY] {
            let err = panel(rect(), PanelState::new().with_collapsed_height(bad)).unwrap_err();
            assert!(
                matches!(err, WidgetError::NonPositiveSize { .. }),
                "collapsed height {bad} accepted"
            );
        }
    }

    #[test]
    fn panel_heights_stay_positive_through_toggle() {
        let mut w = panel(
            NdcRect::new(0.0, 0.5, 0.2, 0.3),
            PanelState::new().with_collapsed_height(0.05),
        )
        .unwrap();
        for collapse in [true, false, true, false] {
            let WidgetVariant::Panel(state) = w.variant_mut() else {
                unreachable!()
            };
            let height = state.set_collapsed(collapse);
            w.set_height(height);
            assert!(w.rect().size.y > 0.0);
        }
        assert!((w.rect().size.y - 0.3).abs() < 1e-6);
    }
}
