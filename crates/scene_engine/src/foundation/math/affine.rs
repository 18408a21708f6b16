//! Affine matrices with an implicit `[0 .. 0 1]` bottom row
//!
//! [`Mat3x4`] packs a 3D rigid/affine transform in 12 floats and [`Mat2x3`]
//! packs a 2D one in 6. Products and inverses treat the missing row as
//! present, so the result of any operation is again affine.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use bytemuck::{Pod, Zeroable};

use super::matrix::impl_matrix_common;
use super::utils::is_singular;
use super::{Mat2, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// 3x4 column-major affine transform: a 3x3 linear part followed by a
/// translation column
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat3x4 {
    m: [f32; 12],
}

/// 2x3 column-major affine transform: a 2x2 linear part followed by a
/// translation column
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat2x3 {
    m: [f32; 6],
}

impl_matrix_common!(Mat3x4, 3, 4, Vec4, Vec3);
impl_matrix_common!(Mat2x3, 2, 3, Vec3, Vec2);

impl Default for Mat3x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Default for Mat2x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3x4 {
    /// Identity linear part, zero translation
    pub const IDENTITY: Self = Self::from_cols_array([
        1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
    ]);

    /// Rotation by `q` followed by translation `t`
    #[must_use]
    pub fn from_quat_translation(q: Quat, t: Vec3) -> Self {
        let mut out = q.to_mat3().to_mat3x4();
        out.set_translation(t);
        out
    }

    /// 3x3 linear part
    #[must_use]
    pub const fn linear(&self) -> Mat3 {
        let m = &self.m;
        Mat3::from_cols_array([m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8]])
    }

    /// Translation column
    #[must_use]
    pub const fn translation(&self) -> Vec3 {
        Vec3::new(self.m[9], self.m[10], self.m[11])
    }

    /// Replace the translation column
    pub fn set_translation(&mut self, t: Vec3) {
        self.set_col(3, t);
    }

    /// Basis axis `i` (0..=2) or the translation for `i == 3`
    #[must_use]
    pub fn axis(&self, i: usize) -> Vec3 {
        self.col(i)
    }

    /// Promote to a full 4x4 homogeneous matrix
    #[must_use]
    pub const fn to_mat4(&self) -> Mat4 {
        let m = &self.m;
        Mat4::from_cols_array([
            m[0], m[1], m[2], 0.0, //
            m[3], m[4], m[5], 0.0, //
            m[6], m[7], m[8], 0.0, //
            m[9], m[10], m[11], 1.0,
        ])
    }

    /// `self * v` for a homogeneous column vector
    #[must_use]
    pub fn mul_vec4(&self, v: Vec4) -> Vec3 {
        self.linear() * v.truncate() + self.translation() * v.w
    }

    /// Transform a point (implicit w = 1)
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.mul_vec4(p.extend(1.0))
    }

    /// Transform a direction (implicit w = 0)
    #[must_use]
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.linear() * d
    }

    /// Inverse of [`Mat3x4::transform_point`] for a rotation linear part
    ///
    /// Uses the transpose of the linear part, so the result is only correct
    /// when that part is orthonormal.
    #[must_use]
    pub fn transform_inverse(&self, p: Vec3) -> Vec3 {
        self.linear().mul_transpose_vec(p - self.translation())
    }

    /// Inverse of [`Mat3x4::transform_direction`] for a rotation linear part
    #[must_use]
    pub fn transform_inverse_direction(&self, d: Vec3) -> Vec3 {
        self.linear().mul_transpose_vec(d)
    }

    /// Determinant of the implied 4x4, equal to that of the linear part
    #[must_use]
    pub fn determinant(&self) -> f32 {
        self.linear().determinant()
    }

    /// Affine inverse `[A⁻¹ | -A⁻¹t]`, or [`Mat3x4::ZERO`] when singular
    #[must_use]
    pub fn inverse(&self) -> Self {
        if is_singular(self.determinant()) {
            return Self::ZERO;
        }
        let inv = self.linear().inverse();
        let mut out = inv.to_mat3x4();
        out.set_translation(-(inv * self.translation()));
        out
    }
}

impl Mul for Mat3x4 {
    type Output = Self;

    /// Affine composition, `rhs` applied first
    fn mul(self, rhs: Self) -> Self {
        let linear = self.linear() * rhs.linear();
        let mut out = linear.to_mat3x4();
        out.set_translation(self.linear() * rhs.translation() + self.translation());
        out
    }
}

impl Mul<Mat4> for Mat3x4 {
    type Output = Self;

    /// Top three rows of `self * rhs`
    fn mul(self, rhs: Mat4) -> Self {
        (self.to_mat4() * rhs).to_mat3x4()
    }
}

impl Mul<Vec4> for Mat3x4 {
    type Output = Vec3;
    fn mul(self, rhs: Vec4) -> Vec3 {
        self.mul_vec4(rhs)
    }
}

impl Mat2x3 {
    /// Identity linear part, zero translation
    pub const IDENTITY: Self = Self::from_cols_array([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// 2x2 linear part
    #[must_use]
    pub const fn linear(&self) -> Mat2 {
        let m = &self.m;
        Mat2::from_cols_array([m[0], m[1], m[2], m[3]])
    }

    /// Same as [`Mat2x3::linear`]
    #[must_use]
    pub const fn truncate_mat2(&self) -> Mat2 {
        self.linear()
    }

    /// Translation column
    #[must_use]
    pub const fn translation(&self) -> Vec2 {
        Vec2::new(self.m[4], self.m[5])
    }

    /// Replace the translation column
    pub fn set_translation(&mut self, t: Vec2) {
        self.set_col(2, t);
    }

    /// Promote to a full 3x3 homogeneous matrix
    #[must_use]
    pub const fn to_mat3(&self) -> Mat3 {
        let m = &self.m;
        Mat3::from_cols_array([m[0], m[1], 0.0, m[2], m[3], 0.0, m[4], m[5], 1.0])
    }

    /// `self * v` for a homogeneous column vector
    #[must_use]
    pub fn mul_vec3(&self, v: Vec3) -> Vec2 {
        self.linear() * v.truncate() + self.translation() * v.z
    }

    /// Transform a point (implicit w = 1)
    #[must_use]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        self.mul_vec3(p.extend(1.0))
    }

    /// Determinant of the implied 3x3, equal to that of the linear part
    #[must_use]
    pub fn determinant(&self) -> f32 {
        self.linear().determinant()
    }

    /// Affine inverse `[A⁻¹ | -A⁻¹t]`, or [`Mat2x3::ZERO`] when singular
    #[must_use]
    pub fn inverse(&self) -> Self {
        if is_singular(self.determinant()) {
            return Self::ZERO;
        }
        let inv = self.linear().inverse();
        let t = -(inv * self.translation());
        let i = inv.to_cols_array();
        Self::from_cols_array([i[0], i[1], i[2], i[3], t.x, t.y])
    }
}

impl Mul for Mat2x3 {
    type Output = Self;

    /// Affine composition, `rhs` applied first
    fn mul(self, rhs: Self) -> Self {
        let l = (self.linear() * rhs.linear()).to_cols_array();
        let t = self.linear() * rhs.translation() + self.translation();
        Self::from_cols_array([l[0], l[1], l[2], l[3], t.x, t.y])
    }
}

impl Mul<Mat3> for Mat2x3 {
    type Output = Self;

    /// Top two rows of `self * rhs`
    fn mul(self, rhs: Mat3) -> Self {
        (self.to_mat3() * rhs).truncate_mat2x3()
    }
}

impl Mul<Vec3> for Mat2x3 {
    type Output = Vec2;
    fn mul(self, rhs: Vec3) -> Vec2 {
        self.mul_vec3(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn sample_affine() -> Mat3x4 {
        let rotation = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.9);
        let mut m = Mat3x4::from_quat_translation(rotation, Vec3::new(4.0, -5.0, 6.0));
        m.set_col(0, m.col(0) * 2.0);
        m
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample_affine();
        assert_eq!(Mat3x4::IDENTITY * m, m);
        assert_eq!(Mat3x4::default().to_mat4(), Mat4::IDENTITY);
        assert_eq!(Mat3x4::IDENTITY.transform_point(Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn test_product_matches_homogeneous_product() {
        let a = sample_affine();
        let b = Mat3x4::from_quat_translation(Quat::from_rotation_x(0.4), Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!((a * b).to_mat4(), a.to_mat4() * b.to_mat4(), epsilon = EPSILON);
        assert_relative_eq!(a * b.to_mat4(), a * b, epsilon = EPSILON);
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = sample_affine();
        let inv = m.inverse();
        assert_relative_eq!(m * inv, Mat3x4::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(inv.to_mat4(), m.to_mat4().inverse(), epsilon = EPSILON);
        assert_relative_eq!(m.determinant(), m.to_mat4().determinant(), epsilon = EPSILON);
    }

    #[test]
    fn test_singular_inverse_is_zero() {
        let mut m = Mat3x4::IDENTITY;
        m.set_col(1, Vec3::ZERO);
        assert_eq!(m.inverse(), Mat3x4::ZERO);
    }

    #[test]
    fn test_rigid_transform_inverse() {
        let m = Mat3x4::from_quat_translation(Quat::from_rotation_y(1.2), Vec3::new(3.0, 0.0, -1.0));
        let p = Vec3::new(0.5, 2.0, -7.0);
        assert_relative_eq!(m.transform_inverse(m.transform_point(p)), p, epsilon = EPSILON);
        let d = Vec3::new(0.0, 1.0, 1.0);
        assert_relative_eq!(
            m.transform_inverse_direction(m.transform_direction(d)),
            d,
            epsilon = EPSILON
        );
        assert_relative_eq!(m.axis(3), m.translation());
    }

    #[test]
    fn test_mat2x3_inverse_and_product() {
        let m = Mat2x3::from_cols_array([2.0, 1.0, -1.0, 3.0, 5.0, -2.0]);
        let inv = m.inverse();
        assert_relative_eq!(m * inv, Mat2x3::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(inv * m, Mat2x3::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(inv.to_mat3(), m.to_mat3().inverse(), epsilon = EPSILON);
        let p = Vec2::new(1.5, -0.5);
        assert_relative_eq!(inv.transform_point(m.transform_point(p)), p, epsilon = EPSILON);
    }

    #[test]
    fn test_mat2x3_with_mat3() {
        let m = Mat2x3::from_cols_array([2.0, 0.0, 0.0, 2.0, 1.0, 1.0]);
        let r = Mat2::from_angle(0.5).to_mat3();
        assert_relative_eq!((m * r).to_mat3(), m.to_mat3() * r, epsilon = EPSILON);
        assert_eq!(m * Vec3::new(1.0, 1.0, 0.0), Vec2::new(2.0, 2.0));
    }
}
