use glam::{Vec2, Vec3};
use std::sync::Arc;

use crate::{
    math::{dot, normalise},
    texture::Texture,
    util::*,
};

pub const DEFAULT_LIGHT_DIRECTION: Vec3 = Vec3::new(0.4, 0.8, 0.4);

// Perspective-corrected attributes of a single covered pixel
#[derive(Copy, Clone, Debug)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
    pub normal: Vec3,
    pub uv: Vec2,
    pub barycentric: Vec3,
}

/// Computes the color of a fragment that passed the depth test.
pub trait PixelShader: Send + Sync {
    fn shade(&self, fragment: &Fragment) -> Color;
}

// Clamped N.L against a directional light
fn lambert(normal: Vec3, light_dir: Vec3) -> f32 {
    dot(normalise(normal), light_dir).max(0.0)
}

// Greyscale diffuse lighting
pub struct LambertShader {
    light_dir: Vec3,
}

impl LambertShader {
    pub fn new(light_direction: Vec3) -> Self {
        Self {
            light_dir: normalise(light_direction),
        }
    }
}

impl Default for LambertShader {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_DIRECTION)
    }
}

impl PixelShader for LambertShader {
    fn shade(&self, fragment: &Fragment) -> Color {
        let n_dot_l = lambert(fragment.normal, self.light_dir);
        Color::grey(unorm_to_u8(n_dot_l))
    }
}

// Texture color modulated by diffuse lighting
pub struct TexturedLambertShader {
    light_dir: Vec3,
    texture: Arc<Texture>,
}

impl TexturedLambertShader {
    pub fn new(light_direction: Vec3, texture: Arc<Texture>) -> Self {
        Self {
            light_dir: normalise(light_direction),
            texture,
        }
    }
}

impl PixelShader for TexturedLambertShader {
    fn shade(&self, fragment: &Fragment) -> Color {
        let n_dot_l = lambert(fragment.normal, self.light_dir);
        let texel = self.texture.sample(fragment.uv.x, fragment.uv.y);
        let modulate = |channel: u8| (channel as f32 * n_dot_l).round() as u8;
        Color::new(modulate(texel.r), modulate(texel.g), modulate(texel.b), 255)
    }
}
