//! OpenGL-convention view and projection matrices
//!
//! Right-handed eye space looking down `-Z`, clip-space depth in `[-1, 1]`,
//! window depth in `[0, 1]`.

use super::utils::is_singular;
use super::{Mat4, Vec3};

/// Window rectangle that normalized device coordinates map onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// Left edge in pixels
    pub x: i32,
    /// Bottom edge in pixels
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Viewport {
    /// Create a new viewport
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Width over height
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// View matrix for an eye at `eye` looking toward `center`
///
/// `up` need not be unit length or perpendicular to the view direction.
#[must_use]
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let f = (center - eye).normalize();
    let s = f.cross(up.normalize()).normalize();
    let u = s.cross(f);

    let basis = Mat4::from_cols_array([
        s.x, u.x, -f.x, 0.0, //
        s.y, u.y, -f.y, 0.0, //
        s.z, u.z, -f.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);
    basis * Mat4::from_translation(-eye)
}

/// Perspective projection with vertical field of view `fovy` in radians
#[must_use]
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fovy * 0.5).tan();
    let nmf = near - far;
    Mat4::from_cols_array([
        f / aspect, 0.0, 0.0, 0.0, //
        0.0, f, 0.0, 0.0, //
        0.0, 0.0, (near + far) / nmf, -1.0, //
        0.0, 0.0, (2.0 * far * near) / nmf, 0.0,
    ])
}

/// Orthographic projection of the given box
#[must_use]
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rml = right - left;
    let tmb = top - bottom;
    let fmn = far - near;
    Mat4::from_cols_array([
        2.0 / rml, 0.0, 0.0, 0.0, //
        0.0, 2.0 / tmb, 0.0, 0.0, //
        0.0, 0.0, -2.0 / fmn, 0.0, //
        -(right + left) / rml, -(top + bottom) / tmb, -(far + near) / fmn, 1.0,
    ])
}

/// [`ortho`] with near `-1` and far `1`
#[must_use]
pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Mat4 {
    ortho(left, right, bottom, top, -1.0, 1.0)
}

/// Off-axis perspective projection of the given near-plane rectangle
#[must_use]
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rml = right - left;
    let tmb = top - bottom;
    let fmn = far - near;
    let a = (right + left) / rml;
    let b = (top + bottom) / tmb;
    let c = -(far + near) / fmn;
    let d = -(2.0 * far * near) / fmn;
    Mat4::from_cols_array([
        (2.0 * near) / rml, 0.0, 0.0, 0.0, //
        0.0, (2.0 * near) / tmb, 0.0, 0.0, //
        a, b, c, -1.0, //
        0.0, 0.0, d, 0.0,
    ])
}

/// Map an object-space point to window coordinates (x, y in pixels, z in `[0, 1]`)
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn project(obj: Vec3, modelview: &Mat4, projection: &Mat4, viewport: &Viewport) -> Vec3 {
    let clip = (*projection * *modelview) * obj.extend(1.0);
    let ndc = clip * (1.0 / clip.w);
    Vec3::new(
        viewport.x as f32 + (viewport.width as f32 * (ndc.x + 1.0)) / 2.0,
        viewport.y as f32 + (viewport.height as f32 * (ndc.y + 1.0)) / 2.0,
        (ndc.z + 1.0) / 2.0,
    )
}

/// Inverse of [`project`]
///
/// Returns [`Vec3::ZERO`] when `projection * modelview` is singular.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unproject(win: Vec3, modelview: &Mat4, projection: &Mat4, viewport: &Viewport) -> Vec3 {
    let combined = *projection * *modelview;
    if is_singular(combined.determinant()) {
        return Vec3::ZERO;
    }
    let ndc = Vec3::new(
        (2.0 * (win.x - viewport.x as f32) / viewport.width as f32) - 1.0,
        (2.0 * (win.y - viewport.y as f32) / viewport.height as f32) - 1.0,
        2.0 * win.z - 1.0,
    );
    let obj = combined.inverse() * ndc.extend(1.0);
    obj.truncate() * (1.0 / obj.w)
}
