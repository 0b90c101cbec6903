//! Frame resource ring.
//!
//! `frame_count` buffer sets rotate between CPU writes and GPU reads. Each
//! [`FrameResource`] remembers the fence value of the last submission that
//! used it; [`FrameRing::advance`] blocks until the GPU has passed that value
//! before handing the slot back for writing.

mod camera;
mod constants;
mod resource;
mod ring;
mod scene;
mod sizing;

pub use camera::Camera;
pub use constants::{GuiData, GuiVertex, InstanceData, Light, MaterialData, PassConstants, MAX_LIGHTS};
pub use resource::{FrameResource, FrameState};
pub use ring::FrameRing;
pub use scene::{DirectionalLight, Instance, Material, Pass, RenderItem, SceneError, SceneState, PASS_COUNT};
pub use sizing::{FrameResourceSizing, RingConfig};
