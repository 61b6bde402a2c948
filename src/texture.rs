use crate::error::{RenderError, RenderResult};
use crate::util::Color;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA8 data
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
}

impl Texture {
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> RenderResult<Self> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 4 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data,
            wrap_u: WrapMode::Repeat,
            wrap_v: WrapMode::Repeat,
        })
    }

    pub fn load(path: &Path) -> RenderResult<Self> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        info!("Loaded texture {} ({}x{})", path.display(), width, height);
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Procedural checkerboard with `cell` sized squares alternating between
    /// `bright` and `dark` grey.
    pub fn checkerboard(size: u32, cell: u32, bright: u8, dark: u8) -> RenderResult<Self> {
        let cell = cell.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let is_bright = ((x / cell) ^ (y / cell)) & 1 == 1;
                let v = if is_bright { bright } else { dark };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self::from_rgba8(size, size, data)
    }

    pub fn with_wrap_mode(mut self, wrap_u: WrapMode, wrap_v: WrapMode) -> Self {
        self.wrap_u = wrap_u;
        self.wrap_v = wrap_v;
        self
    }

    fn apply_wrap_mode(coord: f32, mode: WrapMode) -> f32 {
        match mode {
            WrapMode::ClampToEdge => coord.clamp(0.0, 1.0),
            WrapMode::Repeat => coord - coord.floor(),
            WrapMode::MirroredRepeat => {
                let period = coord - 2.0 * (coord * 0.5).floor();
                if period > 1.0 { 2.0 - period } else { period }
            }
        }
    }

    /// Nearest-pixel lookup at texture coordinates (u, v).
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = Self::apply_wrap_mode(u, self.wrap_u);
        let v = Self::apply_wrap_mode(v, self.wrap_v);

        // NaN coordinates cast to 0
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as usize;

        let index = (y * self.width as usize + x) * 4;
        Color::new(
            self.data[index],
            self.data[index + 1],
            self.data[index + 2],
            self.data[index + 3],
        )
    }
}
