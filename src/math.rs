use crate::error::{RenderError, RenderResult};
use glam::{Mat4, Vec3, Vec4};
use std::f32::consts::PI;

// Column-major storage: x_axis..w_axis are the four columns of the matrix

pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Returns `v` scaled to unit length. A zero vector is returned unscaled.
pub fn normalise(v: Vec3) -> Vec3 {
    let length = dot(v, v).sqrt();
    v * (1.0 / if length > 0.0 { length } else { 1.0 })
}

/// Transforms a homogeneous vector by a matrix.
#[inline]
pub fn mul_vec4(m: &Mat4, v: Vec4) -> Vec4 {
    m.x_axis * v.x + m.y_axis * v.y + m.z_axis * v.z + m.w_axis * v.w
}

/// Composes two transforms. The result applies `b` first, then `a`.
pub fn mul_mat4(a: &Mat4, b: &Mat4) -> Mat4 {
    Mat4::from_cols(
        mul_vec4(a, b.x_axis),
        mul_vec4(a, b.y_axis),
        mul_vec4(a, b.z_axis),
        mul_vec4(a, b.w_axis),
    )
}

pub fn translate(v: Vec3) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.w_axis = Vec4::new(v.x, v.y, v.z, 1.0);
    m
}

pub fn scale(s: Vec3) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.x_axis.x = s.x;
    m.y_axis.y = s.y;
    m.z_axis.z = s.z;
    m
}

pub fn rotate_x(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m.y_axis = Vec4::new(0.0, cos, sin, 0.0);
    m.z_axis = Vec4::new(0.0, -sin, cos, 0.0);
    m
}

pub fn rotate_y(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m.x_axis = Vec4::new(cos, 0.0, -sin, 0.0);
    m.z_axis = Vec4::new(sin, 0.0, cos, 0.0);
    m
}

pub fn rotate_z(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m.x_axis = Vec4::new(cos, sin, 0.0, 0.0);
    m.y_axis = Vec4::new(-sin, cos, 0.0, 0.0);
    m
}

/// Builds a right-handed view matrix. The rows of the rotation part are the camera's
/// right, up and backward vectors; the translation moves the eye to the origin.
///
/// `up` must not be parallel to the viewing direction.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let forward = normalise(center - eye);
    let right = normalise(cross(forward, up));
    let up = cross(right, forward);

    Mat4::from_cols(
        Vec4::new(right.x, up.x, -forward.x, 0.0),
        Vec4::new(right.y, up.y, -forward.y, 0.0),
        Vec4::new(right.z, up.z, -forward.z, 0.0),
        Vec4::new(-dot(right, eye), -dot(up, eye), dot(forward, eye), 1.0),
    )
}

/// Right-handed perspective projection with OpenGL clip depth in [-1, 1].
pub fn perspective(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> RenderResult<Mat4> {
    if !(fov_y > 0.0 && fov_y < PI) {
        return Err(RenderError::InvalidFieldOfView(fov_y));
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(RenderError::InvalidAspectRatio(aspect));
    }
    if !(z_near.is_finite() && z_far.is_finite() && z_near > 0.0 && z_far > z_near) {
        return Err(RenderError::InvalidDepthRange {
            near: z_near,
            far: z_far,
        });
    }

    let focal_length = 1.0 / (fov_y / 2.0).tan();
    let range_inv = 1.0 / (z_near - z_far);

    Ok(Mat4::from_cols(
        Vec4::new(focal_length / aspect, 0.0, 0.0, 0.0),
        Vec4::new(0.0, focal_length, 0.0, 0.0),
        Vec4::new(0.0, 0.0, (z_far + z_near) * range_inv, -1.0),
        Vec4::new(0.0, 0.0, 2.0 * z_far * z_near * range_inv, 0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn sample_transforms() -> Vec<Mat4> {
        vec![
            translate(Vec3::new(1.0, -2.0, 3.5)),
            scale(Vec3::new(2.0, 0.5, -1.0)),
            rotate_x(0.3),
            rotate_y(-1.2),
            rotate_z(2.7),
            mul_mat4(&translate(Vec3::new(0.0, 1.0, 0.0)), &rotate_y(0.8)),
        ]
    }

    #[test]
    fn identity_is_neutral_for_composition() {
        for m in sample_transforms() {
            assert!(mul_mat4(&m, &Mat4::IDENTITY).abs_diff_eq(m, EPS));
            assert!(mul_mat4(&Mat4::IDENTITY, &m).abs_diff_eq(m, EPS));
        }
    }

    #[test]
    fn composition_applies_right_operand_first() {
        let t = translate(Vec3::new(5.0, 0.0, 0.0));
        let s = scale(Vec3::splat(2.0));
        let p = Vec4::new(1.0, 1.0, 1.0, 1.0);

        // Scale then translate
        let ts = mul_vec4(&mul_mat4(&t, &s), p);
        assert!(ts.abs_diff_eq(Vec4::new(7.0, 2.0, 2.0, 1.0), EPS));

        // Translate then scale
        let st = mul_vec4(&mul_mat4(&s, &t), p);
        assert!(st.abs_diff_eq(Vec4::new(12.0, 2.0, 2.0, 1.0), EPS));
    }

    #[test]
    fn composition_matches_glam() {
        let a = mul_mat4(&rotate_x(0.4), &translate(Vec3::new(1.0, 2.0, 3.0)));
        let b = mul_mat4(&scale(Vec3::new(1.0, 3.0, 2.0)), &rotate_z(-0.9));
        assert!(mul_mat4(&a, &b).abs_diff_eq(a * b, EPS));
    }

    #[test]
    fn normalise_yields_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.001, 0.002, 0.0005),
            Vec3::new(100.0, -250.0, 17.0),
        ] {
            let n = normalise(v);
            assert!((dot(n, n).sqrt() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn normalise_zero_vector_is_zero() {
        let n = normalise(Vec3::ZERO);
        assert_eq!(n, Vec3::ZERO);
        assert!(n.is_finite());
    }

    #[test]
    fn cross_product_is_orthogonal() {
        let pairs = [
            (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.3, -1.2, 2.0), Vec3::new(-4.0, 0.5, 0.25)),
            (Vec3::new(2.0, 2.0, 2.0), Vec3::new(2.0, 2.0, 2.0)),
        ];
        for (a, b) in pairs {
            let c = cross(a, b);
            assert!(dot(c, a).abs() < 1e-4);
            assert!(dot(c, b).abs() < 1e-4);
        }
        assert_eq!(
            cross(Vec3::X, Vec3::Y),
            Vec3::Z,
            "x cross y must be z in a right-handed system"
        );
    }

    #[test]
    fn rotations_match_glam() {
        for angle in [0.0, 0.5, -1.3, 3.0] {
            assert!(rotate_x(angle).abs_diff_eq(Mat4::from_rotation_x(angle), EPS));
            assert!(rotate_y(angle).abs_diff_eq(Mat4::from_rotation_y(angle), EPS));
            assert!(rotate_z(angle).abs_diff_eq(Mat4::from_rotation_z(angle), EPS));
        }
    }

    #[test]
    fn look_at_matches_glam() {
        let eye = Vec3::new(1.0, 2.0, 5.0);
        let center = Vec3::new(-0.5, 0.0, 0.0);
        let up = Vec3::Y;
        let view = look_at(eye, center, up);
        assert!(view.abs_diff_eq(Mat4::look_at_rh(eye, center, up), EPS));

        // The eye lands at the origin of view space
        let eye_view = mul_vec4(&view, eye.extend(1.0));
        assert!(eye_view.abs_diff_eq(Vec4::new(0.0, 0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn perspective_matches_glam() {
        let fov = 60.0f32.to_radians();
        let p = perspective(fov, 800.0 / 600.0, 0.1, 100.0).unwrap();
        let expected = Mat4::perspective_rh_gl(fov, 800.0 / 600.0, 0.1, 100.0);
        assert!(p.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn perspective_maps_near_and_far_to_clip_bounds() {
        let p = perspective(1.0, 1.0, 0.5, 20.0).unwrap();
        let near = mul_vec4(&p, Vec4::new(0.0, 0.0, -0.5, 1.0));
        let far = mul_vec4(&p, Vec4::new(0.0, 0.0, -20.0, 1.0));
        assert!((near.z / near.w + 1.0).abs() < EPS);
        assert!((far.z / far.w - 1.0).abs() < EPS);
    }

    #[test]
    fn perspective_rejects_degenerate_input() {
        assert!(matches!(
            perspective(0.0, 1.0, 0.1, 10.0),
            Err(RenderError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            perspective(PI, 1.0, 0.1, 10.0),
            Err(RenderError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            perspective(f32::NAN, 1.0, 0.1, 10.0),
            Err(RenderError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            perspective(1.0, 0.0, 0.1, 10.0),
            Err(RenderError::InvalidAspectRatio(_))
        ));
        assert!(matches!(
            perspective(1.0, 1.0, 10.0, 10.0),
            Err(RenderError::InvalidDepthRange { .. })
        ));
        assert!(matches!(
            perspective(1.0, 1.0, 0.0, 10.0),
            Err(RenderError::InvalidDepthRange { .. })
        ));
    }
}
