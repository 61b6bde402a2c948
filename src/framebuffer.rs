use crate::error::{RenderError, RenderResult};
use crate::util::*;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CLEAR_COLOR: u32 = 0xFF000000;

// Color target for the rasterizer, one packed 0xAARRGGBB value per pixel
pub struct RenderBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl RenderBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![CLEAR_COLOR; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(CLEAR_COLOR);
    }

    // Out of bounds writes are dropped
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = argb8_pack(color);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(argb8_unpack(self.pixels[y * self.width + x]))
        } else {
            None
        }
    }

    /// Writes the buffer as a binary PPM (P6): RGB bytes, row-major, top row first.
    pub fn write_ppm<W: Write>(&self, writer: W) -> RenderResult<()> {
        let (width, height) = self.dimensions_u32()?;
        let rgb: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|&p| {
                let c = argb8_unpack(p);
                [c.r, c.g, c.b]
            })
            .collect();

        let encoder = PnmEncoder::new(writer)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary));
        encoder.write_image(&rgb, width, height, ExtendedColorType::Rgb8)?;
        Ok(())
    }

    pub fn save_ppm(&self, path: &Path) -> RenderResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn dimensions_u32(&self) -> RenderResult<(u32, u32)> {
        let invalid = || RenderError::InvalidDimensions {
            width: self.width.min(u32::MAX as usize) as u32,
            height: self.height.min(u32::MAX as usize) as u32,
        };
        if self.width == 0 || self.height == 0 {
            return Err(invalid());
        }
        let width = u32::try_from(self.width).map_err(|_| invalid())?;
        let height = u32::try_from(self.height).map_err(|_| invalid())?;
        Ok((width, height))
    }
}

// Per-pixel nearest depth seen so far. +inf means nothing was drawn.
pub struct DepthBuffer {
    pub width: usize,
    pub height: usize,
    pub depth: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.depth.fill(f32::INFINITY);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depth[y * self.width + x])
        } else {
            None
        }
    }
}
