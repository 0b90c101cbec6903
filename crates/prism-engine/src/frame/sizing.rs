/// Worst-case capacities of one frame resource.
///
/// Decided once at startup; every per-frame buffer is allocated to these
/// sizes and never grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResourceSizing {
    /// Pass-constant slots (main, shadow, spectator).
    pub pass_count: usize,
    /// Instances per render item.
    pub max_instance_count: usize,
    pub material_count: usize,
    /// One instance buffer is allocated per render item.
    pub render_item_count: usize,
    /// Widget color slots.
    pub gui_slot_count: usize,
    pub gui_vertex_capacity: usize,
    pub text_vertex_capacity: usize,
}

impl Default for FrameResourceSizing {
    fn default() -> Self {
        Self {
            pass_count: 3,
            max_instance_count: 64,
            material_count: 8,
            render_item_count: 4,
            gui_slot_count: 16,
            gui_vertex_capacity: 64,
            text_vertex_capacity: 800 * 4,
        }
    }
}

/// Ring configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    /// Number of frame resources in flight. Values below 1 are treated as 1.
    pub frame_count: usize,
    pub sizing: FrameResourceSizing,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            frame_count: 3,
            sizing: FrameResourceSizing::default(),
        }
    }
}
