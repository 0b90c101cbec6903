use std::collections::HashMap;

use super::{Widget, WidgetId, WidgetKind, WidgetVariant};
use crate::error::WidgetError;

/// Owns every widget in insertion order. Names are unique.
///
/// Insertion order doubles as paint order and as the hit-test tie-break.
#[derive(Debug, Default)]
pub struct WidgetArena {
    widgets: Vec<Widget>,
    by_name: HashMap<String, WidgetId>,
}

impl WidgetArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, widget: Widget) -> Result<WidgetId, WidgetError> {
        if self.by_name.contains_key(widget.name()) {
            return Err(WidgetError::DuplicateName(widget.name().to_owned()));
        }
        let id = WidgetId(self.widgets.len());
        self.by_name.insert(widget.name().to_owned(), id);
        self.widgets.push(widget);
        Ok(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Result<&Widget, WidgetError> {
        self.widgets
            .get(id.0)
            .ok_or_else(|| WidgetError::UnknownWidget(format!("#{}", id.0)))
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Result<&mut Widget, WidgetError> {
        self.widgets
            .get_mut(id.0)
            .ok_or_else(|| WidgetError::UnknownWidget(format!("#{}", id.0)))
    }

    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.by_name.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Result<WidgetId, WidgetError> {
        self.find(name)
            .ok_or_else(|| WidgetError::UnknownWidget(name.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.widgets
            .iter()
            .enumerate()
            .map(|(i, w)| (WidgetId(i), w))
    }

    /// Records `child` as owned by `panel`.
    pub fn attach_child(&mut self, panel: WidgetId, child: WidgetId) -> Result<(), WidgetError> {
        self.get(child)?;
        match self.get_mut(panel)?.variant_mut() {
            WidgetVariant::Panel(state) => state.push_child(child),
            _ => {
                return Err(WidgetError::NotA {
                    id: panel,
                    expected: WidgetKind::Panel,
                });
            }
        }
        self.get_mut(child)?.set_parent(panel);
        Ok(())
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), WidgetError> {
        self.get_mut(id)?.set_visible(visible);
        Ok(())
    }

    /// Collapses or expands a panel.
    ///
    /// Height becomes the collapsed or original height, the bottom vertices
    /// move, and every child's visibility becomes `!collapse`. Calling this
    /// twice with the same argument leaves the same result. Returns the
    /// children whose visibility was written.
    pub fn change_panel_size(
        &mut self,
        panel: WidgetId,
        collapse: bool,
    ) -> Result<Vec<WidgetId>, WidgetError> {
        let widget = self.get_mut(panel)?;
        let (height, children) = match widget.variant_mut() {
            WidgetVariant::Panel(state) => {
                (state.set_collapsed(collapse), state.children().to_vec())
            }
            _ => {
                return Err(WidgetError::NotA {
                    id: panel,
                    expected: WidgetKind::Panel,
                });
            }
        };
        widget.set_height(height);

        for &child in &children {
            self.set_visible(child, !collapse)?;
        }
        log::debug!(
            "panel {:?} {} ({} children)",
            panel,
            if collapse { "collapsed" } else { "expanded" },
            children.len()
        );
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{ButtonState, PanelState, ScrollBoxState};
    use prism_engine::coords::{ColorRgba, NdcRect};

    fn panel(arena: &mut WidgetArena) -> WidgetId {
        let w = Widget::new(
            "P",
            NdcRect::new(0.1, 0.9, 0.4, 1.0),
            ColorRgba::white(),
            1,
            0,
            WidgetVariant::Panel(PanelState::new()),
        )
        .unwrap();
        arena.insert(w).unwrap()
    }

    fn child(arena: &mut WidgetArena, name: &str) -> WidgetId {
        let w = Widget::new(
            name,
            NdcRect::new(0.15, 0.8, 0.1, 0.1),
            ColorRgba::white(),
            2,
            arena.len(),
            WidgetVariant::ScrollBox(ScrollBoxState::default()),
        )
        .unwrap();
        arena.insert(w).unwrap()
    }

    // ── naming ────────────────────────────────────────────────────────────

    #[test]
    fn duplicate_names_are_rejected() {
        let mut arena = WidgetArena::new();
        panel(&mut arena);
        let again = Widget::new(
            "P",
            NdcRect::new(0.0, 0.0, 0.1, 0.1),
            ColorRgba::white(),
            1,
            1,
            WidgetVariant::Button(ButtonState::new("x")),
        )
        .unwrap();
        assert_eq!(
            arena.insert(again),
            Err(WidgetError::DuplicateName("P".into()))
        );
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn lookup_unknown_name_fails() {
        let arena = WidgetArena::new();
        assert!(matches!(
            arena.lookup("nope"),
            Err(WidgetError::UnknownWidget(_))
        ));
    }

    // ── collapse ──────────────────────────────────────────────────────────

    #[test]
    fn collapse_shrinks_and_hides_children() {
        let mut arena = WidgetArena::new();
        let p = panel(&mut arena);
        let a = child(&mut arena, "A");
        let b = child(&mut arena, "B");
        arena.attach_child(p, a).unwrap();
        arena.attach_child(p, b).unwrap();

        let touched = arena.change_panel_size(p, true).unwrap();
        assert_eq!(touched, vec![a, b]);

        let w = arena.get(p).unwrap();
        assert!((w.rect().size.y - 0.1).abs() < 1e-6);
        let v = w.mesh().vertices();
        assert!((v[0].position[1] - 0.8).abs() < 1e-6);
        assert!((v[3].position[1] - 0.8).abs() < 1e-6);
        assert!(!arena.get(a).unwrap().is_visible());
        assert!(!arena.get(b).unwrap().is_visible());
        assert!(arena.get(p).unwrap().as_panel().unwrap().is_collapsed());
    }

    #[test]
    fn collapse_is_idempotent_and_expand_restores() {
        let mut arena = WidgetArena::new();
        let p = panel(&mut arena);
        let a = child(&mut arena, "A");
        arena.attach_child(p, a).unwrap();

        arena.change_panel_size(p, true).unwrap();
        let once = arena.get(p).unwrap().clone();
        arena.change_panel_size(p, true).unwrap();
        assert_eq!(*arena.get(p).unwrap(), once);

        arena.change_panel_size(p, false).unwrap();
        let w = arena.get(p).unwrap();
        assert!((w.rect().size.y - 1.0).abs() < 1e-6);
        assert!(arena.get(a).unwrap().is_visible());
    }

    #[test]
    fn change_size_on_non_panel_fails() {
        let mut arena = WidgetArena::new();
        let a = child(&mut arena, "A");
        assert_eq!(
            arena.change_panel_size(a, true),
            Err(WidgetError::NotA {
                id: a,
                expected: WidgetKind::Panel
            })
        );
    }

    #[test]
    fn attach_records_parent() {
        let mut arena = WidgetArena::new();
        let p = panel(&mut arena);
        let a = child(&mut arena, "A");
        arena.attach_child(p, a).unwrap();
        assert_eq!(arena.get(a).unwrap().parent(), Some(p));
        assert_eq!(arena.get(p).unwrap().as_panel().unwrap().children(), &[a]);
    }
}
