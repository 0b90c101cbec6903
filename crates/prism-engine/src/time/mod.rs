//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame.
//! The resulting `FrameTime` feeds `Editor::update` and the pass constants.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
