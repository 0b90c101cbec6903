use std::collections::HashSet;

use super::types::{InputEvent, Key, PointerButtonEvent};

/// Input transitions since the last frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Button presses in arrival order.
    pub presses: Vec<PointerButtonEvent>,

    pub keys_pressed: HashSet<Key>,

    /// Accumulated vertical wheel movement in lines.
    pub wheel_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.presses.clear();
        self.keys_pressed.clear();
        self.wheel_lines = 0.0;
    }
}
