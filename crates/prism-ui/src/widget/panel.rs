use super::WidgetId;

pub const DEFAULT_COLLAPSED_HEIGHT: f32 = 0.1;

/// Container state: owned child handles plus the collapse bookkeeping.
///
/// The expanded height is taken from the panel's rect when the widget is
/// built, so both heights are always positive.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    children: Vec<WidgetId>,
    collapsed_height: f32,
    original_height: f32,
    collapsed: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            collapsed_height: DEFAULT_COLLAPSED_HEIGHT,
            original_height: 0.0,
            collapsed: false,
        }
    }

    pub fn with_collapsed_height(mut self, height: f32) -> Self {
        self.collapsed_height = height;
        self
    }

    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub(crate) fn set_original_height(&mut self, height: f32) {
        self.original_height = height;
    }

    pub(crate) fn push_child(&mut self, child: WidgetId) {
        self.children.push(child);
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    #[inline]
    pub fn collapsed_height(&self) -> f32 {
        self.collapsed_height
    }

    #[inline]
    pub fn original_height(&self) -> f32 {
        self.original_height
    }

    /// Records the new state and returns the height the panel should take.
    pub(crate) fn set_collapsed(&mut self, collapse: bool) -> f32 {
        self.collapsed = collapse;
        if collapse {
            self.collapsed_height
        } else {
            self.original_height
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}
