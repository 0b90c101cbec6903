use crate::widget::{WidgetId, WidgetKind};

/// Notification raised when a click was handled by a widget.
///
/// Suppressed clicks (while a scroll box holds focus) raise nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetClick {
    pub kind: WidgetKind,
    pub id: WidgetId,
    pub name: String,
    /// Set for buttons only.
    pub action: Option<String>,
}

impl WidgetClick {
    #[inline]
    pub fn is_action(&self, action: &str) -> bool {
        self.action.as_deref() == Some(action)
    }
}
