use glam::{Mat4, Vec3};

use crate::error::RenderResult;
use crate::math::*;
use crate::scene::SceneConfig;

pub struct RenderCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    fov_y: f32, // Radians
    aspect: f32,
    near: f32,
    far: f32,
    // Cached matrices
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    pub view_project_matrix: Mat4,
}

impl RenderCamera {
    pub fn new(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> RenderResult<Self> {
        let mut camera = Self {
            position,
            target,
            up,
            fov_y,
            aspect,
            near,
            far,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_project_matrix: Mat4::IDENTITY,
        };
        camera.update_matrices()?;
        Ok(camera)
    }

    pub fn from_scene(scene: &SceneConfig) -> RenderResult<Self> {
        Self::new(
            scene.eye,
            scene.target,
            scene.up,
            scene.fov_y_degrees.to_radians(),
            scene.aspect_ratio(),
            scene.z_near,
            scene.z_far,
        )
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn set_fov_y(&mut self, fov_y: f32) -> RenderResult<()> {
        self.fov_y = fov_y;
        self.update_matrices()
    }

    pub fn set_aspect(&mut self, aspect: f32) -> RenderResult<()> {
        self.aspect = aspect;
        self.update_matrices()
    }

    pub fn update_matrices(&mut self) -> RenderResult<()> {
        self.projection_matrix = perspective(self.fov_y, self.aspect, self.near, self.far)?;
        self.view_matrix = look_at(self.position, self.target, self.up);
        self.view_project_matrix = mul_mat4(&self.projection_matrix, &self.view_matrix);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn reference_camera_matrices() {
        let camera = RenderCamera::from_scene(&SceneConfig::default()).unwrap();
        let eye = Vec3::new(0.0, 0.0, 2.5);
        assert!(camera.view_matrix.abs_diff_eq(Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y), 1e-6));
        assert!(
            camera
                .view_project_matrix
                .abs_diff_eq(camera.projection_matrix * camera.view_matrix, 1e-6)
        );
    }

    #[test]
    fn invalid_field_of_view_is_reported() {
        let mut scene = SceneConfig::default();
        scene.fov_y_degrees = 180.0;
        assert!(matches!(
            RenderCamera::from_scene(&scene),
            Err(RenderError::InvalidFieldOfView(_))
        ));

        let mut camera = RenderCamera::from_scene(&SceneConfig::default()).unwrap();
        assert!(camera.set_fov_y(-1.0).is_err());
        assert!(camera.set_fov_y(1.0).is_ok());
        assert_eq!(camera.fov_y(), 1.0);
    }
}
