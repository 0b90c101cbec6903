//! Prism engine crate.
//!
//! Platform and GPU runtime pieces plus the frame resource ring that streams
//! per-frame data to the GPU. Higher layers (`prism-ui`, `prism-studio`) write
//! into [`frame::FrameResource`]s and record draws through [`gpu::CommandSink`].

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod frame;
pub mod gpu;
pub mod logging;
pub mod render;
pub mod text;
