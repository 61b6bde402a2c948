use crate::error::{RenderError, RenderResult};
use crate::framebuffer::{DepthBuffer, RenderBuffer};
use crate::screen::RasterTriangle;
use crate::shader::{Fragment, PixelShader};
use crate::util::*;
use glam::{Vec2, Vec3};
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Winding order, as seen on screen, of triangles that face the camera.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontFace {
    #[default]
    CounterClockwise,
    Clockwise,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullMode {
    #[default]
    Back,
    None,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterizerSettings {
    pub front_face: FrontFace,
    pub cull_mode: CullMode,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub pixels_tested: usize,
    pub pixels_covered: usize,
    pub pixels_written: usize,
}

impl Add for RasterStats {
    type Output = RasterStats;

    fn add(self, other: RasterStats) -> RasterStats {
        RasterStats {
            pixels_tested: self.pixels_tested + other.pixels_tested,
            pixels_covered: self.pixels_covered + other.pixels_covered,
            pixels_written: self.pixels_written + other.pixels_written,
        }
    }
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, other: RasterStats) {
        *self = *self + other;
    }
}

/// Signed half-space function of `p` against the line through `a` and `b`.
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Whether the edge `a -> b` of a positive-area triangle is a top or a left edge.
/// Pixel centers exactly on such an edge are owned by the triangle.
#[inline]
pub fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let e = b - a;
    e.y > 0.0 || (e.y == 0.0 && e.x < 0.0)
}

/// Barycentric weights of `p`, or `None` for a zero-area triangle.
pub fn barycentric(triangle: &RasterTriangle, p: Vec2) -> Option<Vec3> {
    let [v0, v1, v2] = triangle.vertices.map(|v| v.position());
    let area = edge_function(v1, v2, v0);
    if area == 0.0 || !area.is_finite() {
        return None;
    }
    let edges = Vec3::new(
        edge_function(v1, v2, p),
        edge_function(v2, v0, p),
        edge_function(v0, v1, p),
    );
    Some(edges / area)
}

// Everything the inner loop needs, computed once per triangle
struct TriangleSetup {
    positions: [Vec2; 3],
    area: f32,
    top_left: [bool; 3],
    inverse_w: Vec3,
    depth_over_w: Vec3,
    normal_over_w: [Vec3; 3],
    uv_over_w: [Vec2; 3],
}

impl TriangleSetup {
    // Expects a triangle with positive area
    fn new(triangle: &RasterTriangle, area: f32) -> Self {
        let [v0, v1, v2] = triangle.vertices;
        let positions = [v0.position(), v1.position(), v2.position()];
        Self {
            positions,
            area,
            top_left: [
                is_top_left(positions[1], positions[2]),
                is_top_left(positions[2], positions[0]),
                is_top_left(positions[0], positions[1]),
            ],
            inverse_w: Vec3::new(v0.inverse_w, v1.inverse_w, v2.inverse_w),
            depth_over_w: Vec3::new(
                v0.depth * v0.inverse_w,
                v1.depth * v1.inverse_w,
                v2.depth * v2.inverse_w,
            ),
            normal_over_w: [v0.normal_over_w, v1.normal_over_w, v2.normal_over_w],
            uv_over_w: [v0.uv_over_w, v1.uv_over_w, v2.uv_over_w],
        }
    }

    #[inline]
    fn edges(&self, p: Vec2) -> [f32; 3] {
        let [v0, v1, v2] = self.positions;
        [
            edge_function(v1, v2, p),
            edge_function(v2, v0, p),
            edge_function(v0, v1, p),
        ]
    }

    #[inline]
    fn covers(&self, edges: &[f32; 3]) -> bool {
        edges
            .iter()
            .zip(self.top_left.iter())
            .all(|(&e, &top_left)| e > 0.0 || (e == 0.0 && top_left))
    }
}

pub struct Rasterizer {
    pub settings: RasterizerSettings,
}

impl Rasterizer {
    pub fn new(settings: RasterizerSettings) -> Self {
        Self { settings }
    }

    /// Rasterizes one triangle into the color and depth buffers. Covered pixels that
    /// pass the strict-less depth test are shaded and written.
    pub fn draw_triangle<S: PixelShader + ?Sized>(
        &self,
        triangle: &RasterTriangle,
        color: &mut RenderBuffer,
        depth: &mut DepthBuffer,
        shader: &S,
    ) -> RenderResult<RasterStats> {
        if color.width != depth.width || color.height != depth.height {
            return Err(RenderError::InvalidDimensions {
                width: depth.width as u32,
                height: depth.height as u32,
            });
        }

        let positions = triangle.vertices.map(|v| v.position());
        if positions.iter().any(|p| !p.is_finite()) {
            trace!("Skipping triangle with non-finite screen position");
            return Ok(RasterStats::default());
        }

        // Signed area, positive for counter-clockwise on screen
        let area = edge_function(positions[1], positions[2], positions[0]);
        if area == 0.0 {
            trace!("Skipping zero-area triangle");
            return Ok(RasterStats::default());
        }

        let is_front_facing = match self.settings.front_face {
            FrontFace::CounterClockwise => area > 0.0,
            FrontFace::Clockwise => area < 0.0,
        };
        if !is_front_facing && self.settings.cull_mode == CullMode::Back {
            trace!("Culling back-facing triangle");
            return Ok(RasterStats::default());
        }

        // Rewind so the edge functions are positive inside
        let (triangle, area) = if area < 0.0 {
            (triangle.reversed(), -area)
        } else {
            (*triangle, area)
        };

        // Bounding box, clamped to the image (inclusive)
        let min = positions[0].min(positions[1]).min(positions[2]).floor();
        let max = positions[0].max(positions[1]).max(positions[2]).ceil();
        let x0 = (min.x as i64).max(0);
        let y0 = (min.y as i64).max(0);
        let x1 = (max.x as i64).min(color.width as i64 - 1);
        let y1 = (max.y as i64).min(color.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            trace!("Triangle is outside the image");
            return Ok(RasterStats::default());
        }
        debug!("Bounding box: ({}, {}) - ({}, {})", x0, y0, x1, y1);

        let setup = TriangleSetup::new(&triangle, area);
        let (x0, x1) = (x0 as usize, x1 as usize);
        let (y0, y1) = (y0 as usize, y1 as usize);
        let width = color.width;
        let rows = y0 * width..(y1 + 1) * width;

        // Rows are disjoint, so each pixel's depth test and write has a single owner
        let stats = color.pixels[rows.clone()]
            .par_chunks_mut(width)
            .zip(depth.depth[rows].par_chunks_mut(width))
            .enumerate()
            .map(|(row, (color_row, depth_row))| {
                rasterize_row(&setup, y0 + row, x0, x1, color_row, depth_row, shader)
            })
            .reduce(RasterStats::default, |a, b| a + b);

        debug!(
            "Tested {} pixels, covered {}, wrote {}",
            stats.pixels_tested, stats.pixels_covered, stats.pixels_written
        );
        Ok(stats)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(RasterizerSettings::default())
    }
}

fn rasterize_row<S: PixelShader + ?Sized>(
    setup: &TriangleSetup,
    y: usize,
    x0: usize,
    x1: usize,
    color_row: &mut [u32],
    depth_row: &mut [f32],
    shader: &S,
) -> RasterStats {
    let mut stats = RasterStats::default();
    let py = y as f32 + 0.5;

    for x in x0..=x1 {
        stats.pixels_tested += 1;

        // Sample at the pixel center
        let p = Vec2::new(x as f32 + 0.5, py);
        let edges = setup.edges(p);
        if !setup.covers(&edges) {
            continue;
        }
        stats.pixels_covered += 1;

        let bary = Vec3::from_array(edges) / setup.area;

        // Perspective-correct interpolation
        let one_over_w = bary.dot(setup.inverse_w);
        let w = 1.0 / one_over_w;
        let depth = bary.dot(setup.depth_over_w) * w;

        // Strictly nearer wins. Also rejects NaN.
        if !(depth < depth_row[x]) {
            continue;
        }
        depth_row[x] = depth;

        let normal = (setup.normal_over_w[0] * bary.x
            + setup.normal_over_w[1] * bary.y
            + setup.normal_over_w[2] * bary.z)
            * w;
        let uv = (setup.uv_over_w[0] * bary.x
            + setup.uv_over_w[1] * bary.y
            + setup.uv_over_w[2] * bary.z)
            * w;

        let fragment = Fragment {
            x: x as i32,
            y: y as i32,
            depth,
            normal,
            uv,
            barycentric: bary,
        };
        color_row[x] = argb8_pack(shader.shade(&fragment));
        stats.pixels_written += 1;
    }

    stats
}
