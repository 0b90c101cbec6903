//! wgpu device, surface and fence.
//!
//! - [`Gpu`]: Instance/Adapter/Device/Queue plus the window surface
//! - [`GpuFrame`]: one acquired swapchain image with its encoder
//! - [`WgpuFence`]: [`GpuFence`](crate::gpu::GpuFence) driven by queue
//!   completion callbacks

mod context;
mod error;
mod fence;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use fence::WgpuFence;
pub use frame::GpuFrame;
pub use init::GpuInit;
