use crate::gpu::UploadBuffer;

use super::constants::{GuiData, GuiVertex, InstanceData, MaterialData, PassConstants};
use super::sizing::FrameResourceSizing;

/// Whether the CPU may write a frame resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameState {
    /// Fence resolved (or never signaled): safe to write.
    Idle,
    /// Submitted; the GPU may still be reading.
    InFlight,
}

/// One full set of per-frame buffers plus the fence value of the last
/// submission that read them.
#[derive(Debug)]
pub struct FrameResource {
    pub pass_constants: UploadBuffer<PassConstants>,
    /// Indexed by render item.
    pub instances: Vec<UploadBuffer<InstanceData>>,
    pub materials: UploadBuffer<MaterialData>,
    pub gui_data: UploadBuffer<GuiData>,
    pub gui_vertices: UploadBuffer<GuiVertex>,
    pub text_vertices: UploadBuffer<GuiVertex>,
    fence: u64,
}

impl FrameResource {
    pub fn new(sizing: &FrameResourceSizing) -> Self {
        Self {
            pass_constants: UploadBuffer::new("pass constants", sizing.pass_count),
            instances: (0..sizing.render_item_count)
                .map(|_| UploadBuffer::new("instance data", sizing.max_instance_count))
                .collect(),
            materials: UploadBuffer::new("material data", sizing.material_count),
            gui_data: UploadBuffer::new("gui color data", sizing.gui_slot_count),
            gui_vertices: UploadBuffer::new("gui vertices", sizing.gui_vertex_capacity),
            text_vertices: UploadBuffer::new("text vertices", sizing.text_vertex_capacity),
            fence: 0,
        }
    }

    /// Fence value of the last submission that used this resource; `0` if never.
    pub fn fence_value(&self) -> u64 {
        self.fence
    }

    pub(crate) fn set_fence_value(&mut self, value: u64) {
        self.fence = value;
    }

    pub fn state(&self, completed: u64) -> FrameState {
        if self.fence == 0 || completed >= self.fence {
            FrameState::Idle
        } else {
            FrameState::InFlight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_follow_sizing() {
        let sizing = FrameResourceSizing {
            pass_count: 3,
            max_instance_count: 5,
            material_count: 2,
            render_item_count: 4,
            gui_slot_count: 3,
            gui_vertex_capacity: 12,
            text_vertex_capacity: 40,
        };
        let frame = FrameResource::new(&sizing);
        assert_eq!(frame.pass_constants.capacity(), 3);
        assert_eq!(frame.instances.len(), 4);
        assert!(frame.instances.iter().all(|b| b.capacity() == 5));
        assert_eq!(frame.materials.capacity(), 2);
        assert_eq!(frame.gui_data.capacity(), 3);
        assert_eq!(frame.gui_vertices.capacity(), 12);
        assert_eq!(frame.text_vertices.capacity(), 40);
    }

    #[test]
    fn state_follows_fence() {
        let mut frame = FrameResource::new(&FrameResourceSizing::default());
        assert_eq!(frame.state(0), FrameState::Idle);
        frame.set_fence_value(4);
        assert_eq!(frame.state(3), FrameState::InFlight);
        assert_eq!(frame.state(4), FrameState::Idle);
    }
}
