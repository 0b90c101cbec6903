/// Keys the runtime distinguishes. Everything else is `Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Enter,
    ArrowUp,
    ArrowDown,
    /// Platform key code without a dedicated variant.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Wheel movement. Positive `y` scrolls up (away from the user).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl WheelDelta {
    /// Approximate pixels per wheel notch.
    pub const PIXELS_PER_LINE: f32 = 40.0;

    /// Vertical movement in lines.
    pub fn lines_y(self) -> f32 {
        match self {
            WheelDelta::Line { y, .. } => y,
            WheelDelta::Pixel { y, .. } => y / Self::PIXELS_PER_LINE,
        }
    }
}

/// Pointer button transition at a physical-pixel position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: ButtonState,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerButton(PointerButtonEvent),
    Wheel(WheelDelta),
    Key { key: Key, state: ButtonState, repeat: bool },
    PointerLeft,
    Focused(bool),
}
