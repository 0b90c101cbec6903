use glam::{Mat4, Vec3, Vec4};
use thiserror::Error;

use crate::time::FrameTime;

use super::camera::Camera;
use super::constants::{InstanceData, Light, MaterialData, PassConstants};
use super::resource::FrameResource;
use super::sizing::FrameResourceSizing;

/// Pass-constant slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Pass {
    Main = 0,
    Shadow = 1,
    Spectator = 2,
}

/// NDC `[-1, 1]^2` to texture space `[0, 1]^2`.
const NDC_TO_TEX: Mat4 = Mat4::from_cols_array(&[
    0.5, 0.0, 0.0, 0.0, //
    0.0, -0.5, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.5, 0.5, 0.0, 1.0,
]);

const SHADOW_MAP_SIZE: f32 = 2048.0;

/// Number of [`Pass`] slots written every frame.
pub const PASS_COUNT: usize = 3;

/// Scene data that does not fit the frame resource it is written into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("{buffer}: {required} slots needed, frame resource holds {capacity}")]
    Capacity {
        buffer: &'static str,
        required: usize,
        capacity: usize,
    },
}

fn check_capacity(buffer: &'static str, required: usize, capacity: usize) -> Result<(), SceneError> {
    if required > capacity {
        return Err(SceneError::Capacity {
            buffer,
            required,
            capacity,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub world: Mat4,
    pub tex_transform: Mat4,
    pub material_index: u32,
}

impl Instance {
    pub fn at(world: Mat4) -> Self {
        Self {
            world,
            tex_transform: Mat4::IDENTITY,
            material_index: 0,
        }
    }
}

/// A drawable with its own instance buffer in every frame resource.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub name: String,
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse_albedo: Vec4,
    pub fresnel_r0: Vec3,
    pub roughness: f32,
    pub transform: Mat4,
    pub diffuse_map_index: u32,
    pub normal_map_index: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_albedo: Vec4::ONE,
            fresnel_r0: Vec3::splat(0.01),
            roughness: 0.5,
            transform: Mat4::IDENTITY,
            diffuse_map_index: 0,
            normal_map_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub strength: Vec3,
}

/// CPU-side scene data rewritten into a frame resource every frame.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub main_camera: Camera,
    pub spectator_camera: Camera,
    pub light: DirectionalLight,
    pub main_ambient: Vec4,
    pub spectator_ambient: Vec4,
    pub spectator_light_strength: Vec3,
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
    pub render_items: Vec<RenderItem>,
    pub materials: Vec<Material>,
    max_instances: usize,
    max_render_items: usize,
}

impl SceneState {
    /// Empty scene bounded by the frame resource sizing it will be written
    /// into.
    pub fn new(sizing: &FrameResourceSizing) -> Self {
        Self {
            main_camera: Camera::at(Vec3::new(0.0, 2.0, -15.0)),
            spectator_camera: Camera::at(Vec3::new(30.0, 30.0, 20.0)).looking_at(Vec3::ZERO),
            light: DirectionalLight {
                direction: Vec3::new(0.57735, -0.57735, 0.57735),
                strength: Vec3::splat(0.9),
            },
            main_ambient: Vec4::new(0.75, 0.75, 0.75, 1.0),
            spectator_ambient: Vec4::new(0.15, 0.15, 0.25, 1.0),
            spectator_light_strength: Vec3::new(0.5, 0.6, 0.9),
            bounds_center: Vec3::ZERO,
            bounds_radius: (10.0f32 * 10.0 + 15.0 * 15.0).sqrt(),
            render_items: Vec::new(),
            materials: vec![Material::default()],
            max_instances: sizing.max_instance_count,
            max_render_items: sizing.render_item_count,
        }
    }

    /// Adds a render item and returns its index. Fails once every instance
    /// buffer of the frame resource is taken.
    pub fn add_render_item(&mut self, name: impl Into<String>) -> Result<usize, SceneError> {
        check_capacity("render items", self.render_items.len() + 1, self.max_render_items)?;
        self.render_items.push(RenderItem {
            name: name.into(),
            instances: Vec::new(),
        });
        Ok(self.render_items.len() - 1)
    }

    /// Appends an instance to `item`.
    ///
    /// Returns the instance index, or `None` (with a warning) if the item does
    /// not exist or its instance buffer is full.
    pub fn spawn_instance(&mut self, item: usize, instance: Instance) -> Option<usize> {
        let max = self.max_instances;
        let Some(ri) = self.render_items.get_mut(item) else {
            log::warn!("spawn: no render item {item}");
            return None;
        };
        if ri.instances.len() >= max {
            log::warn!("spawn: render item '{}' is full ({} instances)", ri.name, max);
            return None;
        }
        ri.instances.push(instance);
        log::debug!("spawn: '{}' now has {} instances", ri.name, ri.instances.len());
        Some(ri.instances.len() - 1)
    }

    /// Spawns a 2x-scaled instance ten units in front of the main camera.
    pub fn spawn_in_front_of_camera(&mut self, item: usize) -> Option<usize> {
        let world = Mat4::from_translation(self.main_camera.ahead(10.0)) * Mat4::from_scale(Vec3::splat(2.0));
        self.spawn_instance(item, Instance::at(world))
    }

    /// Rewrites pass constants, instance data and materials of `frame`.
    ///
    /// Every capacity is checked before anything is written; on error `frame`
    /// is left untouched.
    pub fn write_into(
        &self,
        frame: &mut FrameResource,
        time: FrameTime,
        target_size: [u32; 2],
    ) -> Result<(), SceneError> {
        check_capacity("pass constants", PASS_COUNT, frame.pass_constants.capacity())?;
        check_capacity("render items", self.render_items.len(), frame.instances.len())?;
        for (item, buffer) in self.render_items.iter().zip(&frame.instances) {
            check_capacity("instance data", item.instances.len(), buffer.capacity())?;
        }
        check_capacity("material data", self.materials.len(), frame.materials.capacity())?;

        let (light_view, light_proj, shadow_transform, light_pos, light_near, light_far) =
            self.shadow_frustum();

        let [w, h] = [target_size[0].max(1) as f32, target_size[1].max(1) as f32];
        let aspect = w / h;

        let mut main = self.camera_pass(&self.main_camera, aspect, [w, h], time, shadow_transform);
        main.ambient_light = self.main_ambient.to_array();
        main.lights[0] = Light {
            direction: self.light.direction.to_array(),
            strength: self.light.strength.to_array(),
            ..Light::default()
        };

        let mut shadow = pass_from(light_view, light_proj);
        shadow.eye_pos = light_pos.to_array();
        shadow.render_target_size = [SHADOW_MAP_SIZE, SHADOW_MAP_SIZE];
        shadow.inv_render_target_size = [1.0 / SHADOW_MAP_SIZE, 1.0 / SHADOW_MAP_SIZE];
        shadow.near_z = light_near;
        shadow.far_z = light_far;

        let mut spectator =
            self.camera_pass(&self.spectator_camera, aspect, [w, h], time, shadow_transform);
        spectator.ambient_light = self.spectator_ambient.to_array();
        spectator.lights[0] = Light {
            direction: self.light.direction.to_array(),
            strength: self.spectator_light_strength.to_array(),
            ..Light::default()
        };

        let passes = [(Pass::Main, main), (Pass::Shadow, shadow), (Pass::Spectator, spectator)];
        for (pass, constants) in passes {
            frame.pass_constants.copy_data(pass as usize, &constants);
        }

        for (item, buffer) in self.render_items.iter().zip(frame.instances.iter_mut()) {
            for (slot, inst) in item.instances.iter().enumerate() {
                buffer.copy_data(
                    slot,
                    &InstanceData {
                        world: inst.world.to_cols_array_2d(),
                        tex_transform: inst.tex_transform.to_cols_array_2d(),
                        material_index: inst.material_index,
                        _pad: [0; 3],
                    },
                );
            }
        }

        for (slot, mat) in self.materials.iter().enumerate() {
            frame.materials.copy_data(
                slot,
                &MaterialData {
                    diffuse_albedo: mat.diffuse_albedo.to_array(),
                    fresnel_r0: mat.fresnel_r0.to_array(),
                    roughness: mat.roughness,
                    mat_transform: mat.transform.to_cols_array_2d(),
                    diffuse_map_index: mat.diffuse_map_index,
                    normal_map_index: mat.normal_map_index,
                    _pad: [0; 2],
                },
            );
        }
        Ok(())
    }

    /// Instance count to draw for `item`.
    pub fn instance_count(&self, item: usize) -> u32 {
        self.render_items.get(item).map_or(0, |ri| ri.instances.len() as u32)
    }

    fn camera_pass(
        &self,
        camera: &Camera,
        aspect: f32,
        size: [f32; 2],
        time: FrameTime,
        shadow_transform: Mat4,
    ) -> PassConstants {
        let mut pc = pass_from(camera.view(), camera.proj(aspect));
        pc.shadow_transform = shadow_transform.to_cols_array_2d();
        pc.eye_pos = camera.position.to_array();
        pc.render_target_size = size;
        pc.inv_render_target_size = [1.0 / size[0], 1.0 / size[1]];
        pc.near_z = camera.near_z;
        pc.far_z = camera.far_z;
        pc.total_time = time.total;
        pc.delta_time = time.dt;
        pc
    }

    /// Orthographic light frustum enclosing the scene bounds.
    fn shadow_frustum(&self) -> (Mat4, Mat4, Mat4, Vec3, f32, f32) {
        let r = self.bounds_radius;
        let dir = self.light.direction.normalize_or_zero();
        let light_pos = -2.0 * r * dir;
        let view = Mat4::look_at_lh(light_pos, self.bounds_center, Vec3::Y);

        let c = view.transform_point3(self.bounds_center);
        let (near, far) = (c.z - r, c.z + r);
        let proj = Mat4::orthographic_lh(c.x - r, c.x + r, c.y - r, c.y + r, near, far);

        let shadow = NDC_TO_TEX * proj * view;
        (view, proj, shadow, light_pos, near, far)
    }
}

fn pass_from(view: Mat4, proj: Mat4) -> PassConstants {
    let view_proj = proj * view;
    PassConstants {
        view: view.to_cols_array_2d(),
        inv_view: view.inverse().to_cols_array_2d(),
        proj: proj.to_cols_array_2d(),
        inv_proj: proj.inverse().to_cols_array_2d(),
        view_proj: view_proj.to_cols_array_2d(),
        inv_view_proj: view_proj.inverse().to_cols_array_2d(),
        view_proj_tex: (NDC_TO_TEX * view_proj).to_cols_array_2d(),
        ..PassConstants::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameResourceSizing;
    use crate::time::FrameClock;

    fn sizing() -> FrameResourceSizing {
        FrameResourceSizing {
            max_instance_count: 2,
            render_item_count: 1,
            ..FrameResourceSizing::default()
        }
    }

    fn scene() -> SceneState {
        SceneState::new(&sizing())
    }

    // ── spawning ──────────────────────────────────────────────────────────

    #[test]
    fn spawn_rejects_past_capacity() {
        let mut scene = scene();
        let box_item = scene.add_render_item("box").unwrap();
        assert_eq!(scene.spawn_in_front_of_camera(box_item), Some(0));
        assert_eq!(scene.spawn_in_front_of_camera(box_item), Some(1));
        assert_eq!(scene.spawn_in_front_of_camera(box_item), None);
        assert_eq!(scene.instance_count(box_item), 2);
    }

    #[test]
    fn spawn_unknown_item_is_rejected() {
        let mut scene = scene();
        assert_eq!(scene.spawn_instance(3, Instance::at(Mat4::IDENTITY)), None);
    }

    #[test]
    fn spawned_instance_sits_ahead_of_camera() {
        let mut scene = scene();
        let item = scene.add_render_item("box").unwrap();
        scene.spawn_in_front_of_camera(item);
        let world = scene.render_items[item].instances[0].world;
        let expected = scene.main_camera.ahead(10.0);
        assert!((world.w_axis.truncate() - expected).length() < 1e-5);
    }

    // ── frame writes ──────────────────────────────────────────────────────

    #[test]
    fn write_into_fills_three_passes() {
        let scene = scene();
        let mut frame = FrameResource::new(&sizing());
        let time = FrameClock::new().tick();
        scene.write_into(&mut frame, time, [800, 600]).unwrap();

        let main = frame.pass_constants.get(Pass::Main as usize).copied();
        let shadow = frame.pass_constants.get(Pass::Shadow as usize).copied();
        let spectator = frame.pass_constants.get(Pass::Spectator as usize).copied();
        assert_eq!(main.map(|p| p.render_target_size), Some([800.0, 600.0]));
        assert_eq!(shadow.map(|p| p.render_target_size), Some([2048.0, 2048.0]));
        assert_eq!(main.map(|p| p.ambient_light), Some([0.75, 0.75, 0.75, 1.0]));
        assert_eq!(spectator.map(|p| p.eye_pos), Some([30.0, 30.0, 20.0]));
    }

    #[test]
    fn write_into_copies_instances() {
        let mut scene = scene();
        let item = scene.add_render_item("box").unwrap();
        scene.spawn_instance(item, Instance::at(Mat4::from_translation(Vec3::X)));
        let mut frame = FrameResource::new(&sizing());
        scene.write_into(&mut frame, FrameClock::new().tick(), [1, 1]).unwrap();
        let written = frame.instances[0].get(0).map(|d| d.world[3]);
        assert_eq!(written, Some([1.0, 0.0, 0.0, 1.0]));
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn render_items_past_sizing_are_rejected() {
        let mut scene = scene();
        assert_eq!(scene.add_render_item("box"), Ok(0));
        assert_eq!(
            scene.add_render_item("sphere"),
            Err(SceneError::Capacity {
                buffer: "render items",
                required: 2,
                capacity: 1,
            })
        );
    }

    #[test]
    fn write_into_fails_on_too_few_pass_slots() {
        let mut frame = FrameResource::new(&FrameResourceSizing {
            pass_count: 2,
            ..sizing()
        });
        let err = scene()
            .write_into(&mut frame, FrameClock::new().tick(), [1, 1])
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::Capacity {
                buffer: "pass constants",
                required: PASS_COUNT,
                capacity: 2,
            }
        );
    }

    #[test]
    fn write_into_fails_on_unbacked_render_item() {
        let mut scene = scene();
        scene.add_render_item("box").unwrap();
        let mut frame = FrameResource::new(&FrameResourceSizing {
            render_item_count: 0,
            ..sizing()
        });
        let err = scene
            .write_into(&mut frame, FrameClock::new().tick(), [1, 1])
            .unwrap_err();
        assert!(matches!(err, SceneError::Capacity { buffer: "render items", .. }));
    }

    #[test]
    fn write_into_fails_on_overfull_instances_and_materials() {
        let mut scene = scene();
        let item = scene.add_render_item("box").unwrap();
        scene.render_items[item].instances = vec![Instance::at(Mat4::IDENTITY); 3];
        let mut frame = FrameResource::new(&sizing());
        let err = scene
            .write_into(&mut frame, FrameClock::new().tick(), [1, 1])
            .unwrap_err();
        assert!(matches!(err, SceneError::Capacity { buffer: "instance data", required: 3, capacity: 2 }));

        scene.render_items[item].instances.clear();
        scene.materials = vec![Material::default(); sizing().material_count + 1];
        let err = scene
            .write_into(&mut frame, FrameClock::new().tick(), [1, 1])
            .unwrap_err();
        assert!(matches!(err, SceneError::Capacity { buffer: "material data", .. }));
        assert!(frame.instances[0].get(0).is_some_and(|d| d.world == [[0.0; 4]; 4]));
    }
}
