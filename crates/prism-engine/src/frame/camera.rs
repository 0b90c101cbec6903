use glam::{Mat4, Vec3};

/// Left-handed perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit view direction.
    pub look: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub near_z: f32,
    pub far_z: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, -15.0),
            look: Vec3::Z,
            up: Vec3::Y,
            fov_y: 0.25 * std::f32::consts::PI,
            near_z: 1.0,
            far_z: 1000.0,
        }
    }
}

impl Camera {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Points the camera at `target`. A target equal to the position is ignored.
    pub fn looking_at(mut self, target: Vec3) -> Self {
        if let Some(dir) = (target - self.position).try_normalize() {
            self.look = dir;
        }
        self
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_lh(self.position, self.look, self.up)
    }

    pub fn proj(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, aspect, self.near_z, self.far_z)
    }

    /// Point `distance` units straight ahead.
    pub fn ahead(&self, distance: f32) -> Vec3 {
        self.position + self.look.normalize_or_zero() * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looking_at_normalizes_direction() {
        let cam = Camera::at(Vec3::ZERO).looking_at(Vec3::new(0.0, 0.0, 10.0));
        assert!((cam.look - Vec3::Z).length() < 1e-6);
        assert!((cam.ahead(10.0) - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn view_maps_eye_to_origin() {
        let cam = Camera::at(Vec3::new(3.0, 4.0, 5.0)).looking_at(Vec3::ZERO);
        let eye = cam.view().transform_point3(cam.position);
        assert!(eye.length() < 1e-5);
    }
}
