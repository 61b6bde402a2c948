//! Scene description for a single-triangle frame.
//!
//! Scenes are stored as RON. Any field left out of a scene file takes its value
//! from the reference scene: a triangle facing +z in front of a camera at
//! (0, 0, 2.5), rendered at 800x600 with a 60 degree vertical field of view.

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::RenderResult;
use crate::math::*;
use crate::rasterizer::{CullMode, FrontFace, RasterizerSettings};
use crate::shader::DEFAULT_LIGHT_DIRECTION;
use crate::vertex::Vertex;

/// Object to world placement, applied as scale, then rotation (x, y, z), then translation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTransform {
    pub translation: Vec3,
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl ModelTransform {
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation_degrees;
        let rotation = mul_mat4(
            &rotate_z(r.z.to_radians()),
            &mul_mat4(&rotate_y(r.y.to_radians()), &rotate_x(r.x.to_radians())),
        );
        mul_mat4(
            &translate(self.translation),
            &mul_mat4(&rotation, &scale(self.scale)),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: usize,
    pub height: usize,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    // Defaults to width / height
    pub aspect: Option<f32>,
    pub z_near: f32,
    pub z_far: f32,
    pub vertices: [Vertex; 3],
    pub model: ModelTransform,
    pub light_direction: Vec3,
    pub front_face: FrontFace,
    pub cull_mode: CullMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            eye: Vec3::new(0.0, 0.0, 2.5),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 60.0,
            aspect: None,
            z_near: 0.1,
            z_far: 100.0,
            vertices: [
                Vertex {
                    position: Vec4::new(-0.7, -0.6, 0.0, 1.0),
                    normal: Vec3::Z,
                    uv: Vec2::new(0.0, 0.0),
                },
                Vertex {
                    position: Vec4::new(0.6, -0.6, 0.0, 1.0),
                    normal: Vec3::Z,
                    uv: Vec2::new(1.0, 0.0),
                },
                Vertex {
                    position: Vec4::new(0.0, 0.6, 0.0, 1.0),
                    normal: Vec3::Z,
                    uv: Vec2::new(0.5, 1.0),
                },
            ],
            model: ModelTransform::default(),
            light_direction: DEFAULT_LIGHT_DIRECTION,
            front_face: FrontFace::default(),
            cull_mode: CullMode::default(),
        }
    }
}

impl SceneConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect.unwrap_or(self.width as f32 / self.height as f32)
    }

    pub fn rasterizer_settings(&self) -> RasterizerSettings {
        RasterizerSettings {
            front_face: self.front_face,
            cull_mode: self.cull_mode,
        }
    }

    pub fn from_ron_str(s: &str) -> RenderResult<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn to_ron_string(&self) -> RenderResult<String> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> RenderResult<SceneConfig> {
    let contents = fs::read_to_string(path)?;
    SceneConfig::from_ron_str(&contents)
}

pub fn save_scene<P: AsRef<Path>>(scene: &SceneConfig, path: P) -> RenderResult<()> {
    fs::write(path, scene.to_ron_string()?)?;
    Ok(())
}
