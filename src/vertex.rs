use crate::error::{RenderError, RenderResult};
use crate::math::*;
use glam::{Mat4, Vec2, Vec3, Vec4};
use log::trace;
use serde::{Deserialize, Serialize};

// Smallest clip-space |w| accepted before the projection is considered degenerate
pub const MIN_CLIP_W: f32 = 1e-6;

// Object-space input vertex
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec4,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.extend(1.0),
            normal,
            uv,
        }
    }
}

// Output of the vertex stage
#[derive(Copy, Clone, Debug)]
pub struct VsOut {
    pub clip: Vec4,
    pub normal: Vec3,
    pub uv: Vec2,
    pub inverse_w: f32,
}

/// Transforms a vertex to clip space with `projection * view * model`.
pub fn vertex_shader(
    vertex: &Vertex,
    model: &Mat4,
    view: &Mat4,
    projection: &Mat4,
) -> RenderResult<VsOut> {
    let mvp = mul_mat4(projection, &mul_mat4(view, model));
    vertex_shader_mvp(vertex, &mvp)
}

/// Same as [`vertex_shader`] with the matrices already composed.
pub fn vertex_shader_mvp(vertex: &Vertex, mvp: &Mat4) -> RenderResult<VsOut> {
    let clip = mul_vec4(mvp, vertex.position);
    trace!("clip = ({}, {}, {}, {})", clip.x, clip.y, clip.z, clip.w);

    if !clip.w.is_finite() || clip.w.abs() < MIN_CLIP_W {
        return Err(RenderError::DegenerateProjection { w: clip.w });
    }
    let inverse_w = 1.0 / clip.w;
    trace!("1/w = {}", inverse_w);

    Ok(VsOut {
        clip,
        normal: vertex.normal,
        uv: vertex.uv,
        inverse_w,
    })
}
