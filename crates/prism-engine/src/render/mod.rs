//! GPU rendering subsystem.
//!
//! The overlay renderer replays recorded [`CommandSink`](crate::gpu::CommandSink)
//! draws against the current frame resource's streamed buffers. Geometry is
//! authored directly in NDC, so no viewport uniform is involved.

mod ctx;
mod overlay;

pub use ctx::{RenderCtx, RenderTarget};
pub use overlay::{OverlayRenderer, SceneBuffers};
