use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, MouseButton, PointerButtonEvent};

/// Held buttons/keys and pointer position for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Physical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the held state and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck keys when focus leaves mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.presses.push(PointerButtonEvent {
                                button: *button,
                                state: *state,
                                x: *x,
                                y: *y,
                            });
                        }
                    }
                    ButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::Wheel(delta) => {
                frame.wheel_lines += delta.lines_y();
            }
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::WheelDelta;

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            x,
            y,
        })
    }

    #[test]
    fn press_is_recorded_once_until_released() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(10.0, 20.0));
        state.apply_event(&mut frame, press(10.0, 20.0));
        assert_eq!(frame.presses.len(), 1);
        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
        assert!(state.button_down(MouseButton::Left));
    }

    #[test]
    fn wheel_accumulates_lines() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Wheel(WheelDelta::Line { x: 0.0, y: 1.0 }));
        state.apply_event(&mut frame, InputEvent::Wheel(WheelDelta::Pixel { x: 0.0, y: 80.0 }));
        assert_eq!(frame.wheel_lines, 3.0);
        frame.clear();
        assert_eq!(frame.wheel_lines, 0.0);
        assert!(frame.events.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(0.0, 0.0));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Left));
    }
}
