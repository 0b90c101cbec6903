//! Backend-neutral GPU plumbing used by the frame ring.
//!
//! - [`GpuFence`]: monotonically increasing completion counter
//! - [`UploadBuffer`]: fixed-capacity CPU mirror of a per-frame GPU buffer
//! - [`CommandSink`]: where pipeline switches and indexed draws are recorded
//!
//! The wgpu implementations live in [`crate::device`] and [`crate::render`];
//! tests use [`ManualFence`] and [`CommandRecorder`].

mod draw;
mod fence;
mod upload;

pub use draw::{CommandRecorder, CommandSink, DrawIndexed, PipelineKind, RecordedCommand};
pub use fence::{FenceError, GpuFence, ManualFence};
pub use upload::UploadBuffer;
