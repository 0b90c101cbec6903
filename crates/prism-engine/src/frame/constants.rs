//! GPU-visible per-frame records.
//!
//! All matrices are column-major (`glam` layout). Field order and explicit
//! padding keep every record free of implicit padding so they stay `Pod`.

use bytemuck::{Pod, Zeroable};

pub const MAX_LIGHTS: usize = 3;

type Mat = [[f32; 4]; 4];

const IDENTITY: Mat = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Light {
    pub strength: [f32; 3],
    pub falloff_start: f32,
    pub direction: [f32; 3],
    pub falloff_end: f32,
    pub position: [f32; 3],
    pub spot_power: f32,
}

/// Camera, timing and lighting for one render pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PassConstants {
    pub view: Mat,
    pub inv_view: Mat,
    pub proj: Mat,
    pub inv_proj: Mat,
    pub view_proj: Mat,
    pub inv_view_proj: Mat,
    pub view_proj_tex: Mat,
    pub shadow_transform: Mat,
    pub eye_pos: [f32; 3],
    pub _pad0: f32,
    pub render_target_size: [f32; 2],
    pub inv_render_target_size: [f32; 2],
    pub near_z: f32,
    pub far_z: f32,
    pub total_time: f32,
    pub delta_time: f32,
    pub ambient_light: [f32; 4],
    pub lights: [Light; MAX_LIGHTS],
}

impl Default for PassConstants {
    fn default() -> Self {
        Self {
            view: IDENTITY,
            inv_view: IDENTITY,
            proj: IDENTITY,
            inv_proj: IDENTITY,
            view_proj: IDENTITY,
            inv_view_proj: IDENTITY,
            view_proj_tex: IDENTITY,
            shadow_transform: IDENTITY,
            eye_pos: [0.0; 3],
            _pad0: 0.0,
            render_target_size: [0.0; 2],
            inv_render_target_size: [0.0; 2],
            near_z: 1.0,
            far_z: 1000.0,
            total_time: 0.0,
            delta_time: 0.0,
            ambient_light: [0.0, 0.0, 0.0, 1.0],
            lights: [Light::default(); MAX_LIGHTS],
        }
    }
}

/// One drawable instance of a render item.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub world: Mat,
    pub tex_transform: Mat,
    pub material_index: u32,
    pub _pad: [u32; 3],
}

impl Default for InstanceData {
    fn default() -> Self {
        Self {
            world: IDENTITY,
            tex_transform: IDENTITY,
            material_index: 0,
            _pad: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialData {
    pub diffuse_albedo: [f32; 4],
    pub fresnel_r0: [f32; 3],
    pub roughness: f32,
    pub mat_transform: Mat,
    pub diffuse_map_index: u32,
    pub normal_map_index: u32,
    pub _pad: [u32; 2],
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            diffuse_albedo: [1.0; 4],
            fresnel_r0: [0.01; 3],
            roughness: 0.5,
            mat_transform: IDENTITY,
            diffuse_map_index: 0,
            normal_map_index: 0,
            _pad: [0; 2],
        }
    }
}

/// Per-widget color slot.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GuiData {
    pub color: [f32; 4],
}

/// Vertex shared by widget quads and glyph quads.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GuiVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl GuiVertex {
    #[inline]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, 0.0],
            uv: [u, v],
        }
    }
}
