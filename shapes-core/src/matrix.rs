/// Column-major 4x4 matrix operations for model/view/projection composition
///
/// Every operation post-multiplies: applying `translate`, then `rotate_x`,
/// then `scale` to `A` yields `A * T * Rx * S`. Each operation comes in a pure
/// form returning a new matrix and an in-place `*_mut` form; both give the
/// same result.
use nalgebra::{Matrix4, Point3, Vector3};

/// 4x4 matrix of `f32` cells stored column-major, ready for GPU upload
pub type Mat4 = Matrix4<f32>;

pub fn identity() -> Mat4 {
    Mat4::identity()
}

/// Symmetric perspective projection (OpenGL clip-space conventions)
///
/// Inputs are not validated: callers supply `fovy > 0`, `aspect > 0` and
/// `0 < near < far`. An infinite `far` yields the infinite-far-plane limit.
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fovy / 2.0).tan();
    let mut out = Mat4::zeros();
    out[0] = f / aspect;
    out[5] = f;
    out[11] = -1.0;

    if far.is_finite() {
        let nf = 1.0 / (near - far);
        out[10] = (far + near) * nf;
        out[14] = 2.0 * far * near * nf;
    } else {
        out[10] = -1.0;
        out[14] = -2.0 * near;
    }

    out
}

pub fn translate(m: &Mat4, v: &Vector3<f32>) -> Mat4 {
    let mut out = *m;
    translate_mut(&mut out, v);
    out
}

/// Recompute the translation column from the basis columns
pub fn translate_mut(m: &mut Mat4, v: &Vector3<f32>) {
    let t = m.column(0) * v.x + m.column(1) * v.y + m.column(2) * v.z + m.column(3);
    m.set_column(3, &t);
}

pub fn rotate_x(m: &Mat4, angle: f32) -> Mat4 {
    let mut out = *m;
    rotate_x_mut(&mut out, angle);
    out
}

pub fn rotate_x_mut(m: &mut Mat4, angle: f32) {
    let (s, c) = angle.sin_cos();
    let c1 = m.column(1).clone_owned();
    let c2 = m.column(2).clone_owned();
    m.set_column(1, &(c1 * c + c2 * s));
    m.set_column(2, &(c2 * c - c1 * s));
}

pub fn rotate_y(m: &Mat4, angle: f32) -> Mat4 {
    let mut out = *m;
    rotate_y_mut(&mut out, angle);
    out
}

pub fn rotate_y_mut(m: &mut Mat4, angle: f32) {
    let (s, c) = angle.sin_cos();
    let c0 = m.column(0).clone_owned();
    let c2 = m.column(2).clone_owned();
    m.set_column(0, &(c0 * c - c2 * s));
    m.set_column(2, &(c0 * s + c2 * c));
}

pub fn rotate_z(m: &Mat4, angle: f32) -> Mat4 {
    let mut out = *m;
    rotate_z_mut(&mut out, angle);
    out
}

pub fn rotate_z_mut(m: &mut Mat4, angle: f32) {
    let (s, c) = angle.sin_cos();
    let c0 = m.column(0).clone_owned();
    let c1 = m.column(1).clone_owned();
    m.set_column(0, &(c0 * c + c1 * s));
    m.set_column(1, &(c1 * c - c0 * s));
}

pub fn scale(m: &Mat4, v: &Vector3<f32>) -> Mat4 {
    let mut out = *m;
    scale_mut(&mut out, v);
    out
}

/// Scale the three basis columns; the translation column is left alone
pub fn scale_mut(m: &mut Mat4, v: &Vector3<f32>) {
    for (i, factor) in [v.x, v.y, v.z].into_iter().enumerate() {
        let mut column = m.column_mut(i);
        column *= factor;
    }
}

/// Apply `m` to a point (w = 1), including the homogeneous divide
pub fn transform_point(m: &Mat4, p: &Point3<f32>) -> Point3<f32> {
    m.transform_point(p)
}
