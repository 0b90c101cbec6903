//! Input subsystem.
//!
//! The public API does not expose winit types; the runtime translates
//! platform events through [`platform::winit`].
//!
//! Pointer coordinates are **physical pixels**, top-left origin, so they can
//! be mapped to NDC with the drawable size directly.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton, PointerButtonEvent, WheelDelta};
