use crate::error::{RenderError, RenderResult};
use crate::framebuffer::{DepthBuffer, RenderBuffer};
use crate::math::*;
use crate::rasterizer::{RasterStats, Rasterizer, RasterizerSettings};
use crate::rendercamera::RenderCamera;
use crate::scene::SceneConfig;
use crate::screen::{RasterTriangle, to_screen};
use crate::shader::PixelShader;
use crate::vertex::{Vertex, vertex_shader_mvp};
use glam::Mat4;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

// Owns the color and depth targets for one frame and drives
// vertex stage -> screen mapper -> rasterizer for each triangle
pub struct Renderer {
    width: usize,
    height: usize,
    rasterizer: Rasterizer,
    pub color: RenderBuffer,
    pub depth: DepthBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize, settings: RasterizerSettings) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            });
        }
        Ok(Self {
            width,
            height,
            rasterizer: Rasterizer::new(settings),
            color: RenderBuffer::new(width, height),
            depth: DepthBuffer::new(width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.color.clear();
        self.depth.clear();
    }

    /// Projects three vertices and rasterizes the resulting triangle.
    pub fn draw_triangle<S: PixelShader + ?Sized>(
        &mut self,
        vertices: &[Vertex; 3],
        model: &Mat4,
        camera: &RenderCamera,
        shader: &S,
    ) -> RenderResult<RasterStats> {
        let triangle = self.project_triangle(vertices, model, camera)?;
        self.rasterizer
            .draw_triangle(&triangle, &mut self.color, &mut self.depth, shader)
    }

    /// Runs the vertex stage and the screen mapper for a triangle.
    pub fn project_triangle(
        &self,
        vertices: &[Vertex; 3],
        model: &Mat4,
        camera: &RenderCamera,
    ) -> RenderResult<RasterTriangle> {
        let mvp = mul_mat4(&camera.view_project_matrix, model);
        let mut screen = Vec::with_capacity(3);
        for vertex in vertices {
            let out = vertex_shader_mvp(vertex, &mvp)?;
            let v = to_screen(&out, self.width, self.height);
            debug!("Screen vertex: ({}, {}) depth {}", v.x, v.y, v.depth);
            screen.push(v);
        }
        Ok(RasterTriangle::new(screen[0], screen[1], screen[2]))
    }

    /// Renders the triangle described by a scene into fresh buffers.
    pub fn render_scene<S: PixelShader + ?Sized>(
        &mut self,
        scene: &SceneConfig,
        shader: &S,
    ) -> RenderResult<RasterStats> {
        let start = Instant::now();
        let camera = RenderCamera::from_scene(scene)?;
        self.rasterizer.settings = scene.rasterizer_settings();
        self.clear();

        let stats = self.draw_triangle(&scene.vertices, &scene.model.matrix(), &camera, shader)?;
        info!(
            "Rendered {}x{} in {:.2} ms: {} pixels covered, {} written",
            self.width,
            self.height,
            start.elapsed().as_secs_f64() * 1000.0,
            stats.pixels_covered,
            stats.pixels_written
        );
        Ok(stats)
    }

    pub fn save_ppm(&self, path: &Path) -> RenderResult<()> {
        self.color.save_ppm(path)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}
