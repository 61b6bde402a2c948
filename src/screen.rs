use crate::vertex::VsOut;
use glam::{Vec2, Vec3};

// Screen-space vertex. Attributes are stored divided by clip w so they can be
// interpolated linearly in screen space and corrected with the interpolated 1/w.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    pub normal_over_w: Vec3,
    pub uv_over_w: Vec2,
    pub inverse_w: f32,
}

impl ScreenVertex {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

// A triangle ready for the rasterizer, in the order emitted by the screen mapper
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RasterTriangle {
    pub vertices: [ScreenVertex; 3],
}

impl RasterTriangle {
    pub fn new(v0: ScreenVertex, v1: ScreenVertex, v2: ScreenVertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// The same triangle with the opposite winding order.
    pub fn reversed(&self) -> Self {
        Self::new(self.vertices[0], self.vertices[2], self.vertices[1])
    }
}

/// Perspective divide and viewport mapping. Pixel row 0 is the top of the image,
/// so NDC y is flipped. Depth is remapped from [-1, 1] to [0, 1].
pub fn to_screen(v: &VsOut, width: usize, height: usize) -> ScreenVertex {
    let ndc_x = v.clip.x * v.inverse_w;
    let ndc_y = v.clip.y * v.inverse_w;
    let ndc_z = v.clip.z * v.inverse_w;

    ScreenVertex {
        x: (ndc_x * 0.5 + 0.5) * width as f32,
        y: (1.0 - (ndc_y * 0.5 + 0.5)) * height as f32,
        depth: ndc_z * 0.5 + 0.5,
        normal_over_w: v.normal * v.inverse_w,
        uv_over_w: v.uv * v.inverse_w,
        inverse_w: v.inverse_w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::*;
    use crate::vertex::{Vertex, vertex_shader};
    use glam::{Mat4, Vec4};

    const WIDTH: usize = 800;
    const HEIGHT: usize = 600;

    fn map(position: Vec3, near: f32, far: f32) -> ScreenVertex {
        let view = look_at(Vec3::new(0.0, 0.0, 2.5), Vec3::ZERO, Vec3::Y);
        let projection = perspective(
            60.0f32.to_radians(),
            WIDTH as f32 / HEIGHT as f32,
            near,
            far,
        )
        .unwrap();
        let vertex = Vertex::new(position, Vec3::Z, Vec2::new(0.5, 1.0));
        let out = vertex_shader(&vertex, &Mat4::IDENTITY, &view, &projection).unwrap();
        to_screen(&out, WIDTH, HEIGHT)
    }

    #[test]
    fn optical_axis_maps_to_viewport_center() {
        let (near, far) = (0.1, 100.0);
        let mid = (near + far) / 2.0;
        let screen = map(Vec3::new(0.0, 0.0, 2.5 - mid), near, far);
        assert!((screen.x - WIDTH as f32 / 2.0).abs() < 1e-3);
        assert!((screen.y - HEIGHT as f32 / 2.0).abs() < 1e-3);
        assert!(screen.depth > 0.0 && screen.depth < 1.0);
    }

    #[test]
    fn ndc_corners_map_to_image_corners_with_flip() {
        let top_left = VsOut {
            clip: Vec4::new(-2.0, 2.0, -2.0, 2.0),
            normal: Vec3::Z,
            uv: Vec2::ZERO,
            inverse_w: 0.5,
        };
        let s = to_screen(&top_left, WIDTH, HEIGHT);
        assert_eq!((s.x, s.y, s.depth), (0.0, 0.0, 0.0));

        let bottom_right = VsOut {
            clip: Vec4::new(1.0, -1.0, 1.0, 1.0),
            normal: Vec3::Z,
            uv: Vec2::ZERO,
            inverse_w: 1.0,
        };
        let s = to_screen(&bottom_right, WIDTH, HEIGHT);
        assert_eq!((s.x, s.y, s.depth), (WIDTH as f32, HEIGHT as f32, 1.0));
    }

    #[test]
    fn attributes_are_divided_by_w() {
        let screen = map(Vec3::ZERO, 0.1, 100.0);
        assert!((screen.inverse_w - 0.4).abs() < 1e-6);
        assert!(screen.normal_over_w.abs_diff_eq(Vec3::new(0.0, 0.0, 0.4), 1e-6));
        assert!(screen.uv_over_w.abs_diff_eq(Vec2::new(0.2, 0.4), 1e-6));
    }

    #[test]
    fn reversing_swaps_the_last_two_vertices() {
        let a = map(Vec3::new(-0.7, -0.6, 0.0), 0.1, 100.0);
        let b = map(Vec3::new(0.6, -0.6, 0.0), 0.1, 100.0);
        let c = map(Vec3::new(0.0, 0.6, 0.0), 0.1, 100.0);
        let tri = RasterTriangle::new(a, b, c);
        assert_eq!(tri.reversed().vertices, [a, c, b]);
        assert_eq!(tri.reversed().reversed(), tri);
    }
}
