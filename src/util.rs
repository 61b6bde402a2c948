use serde::{Deserialize, Serialize};

// 8-bit RGBA color
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn grey(intensity: u8) -> Self {
        Self::new(intensity, intensity, intensity, 255)
    }
}

/// Packs a color as 0xAARRGGBB
pub fn argb8_pack(color: Color) -> u32 {
    ((color.a as u32) << 24) | ((color.r as u32) << 16) | ((color.g as u32) << 8) | (color.b as u32)
}

pub fn argb8_unpack(argb: u32) -> Color {
    Color {
        r: ((argb >> 16) & 0xFF) as u8,
        g: ((argb >> 8) & 0xFF) as u8,
        b: (argb & 0xFF) as u8,
        a: ((argb >> 24) & 0xFF) as u8,
    }
}

/// Quantizes a [0, 1] intensity to 8 bits, rounding to nearest
pub fn unorm_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
