//! Column-major square matrices

use std::fmt;
use std::ops::{Add, Mul, MulAssign, Sub};

use bytemuck::{Pod, Zeroable};

use super::affine::{Mat2x3, Mat3x4};
use super::utils::is_singular;
use super::{Quat, Vec2, Vec3, Vec4};

/// Shape-agnostic matrix operations: storage access, rows/columns,
/// element-wise arithmetic, comparison and formatting.
macro_rules! impl_matrix_common {
    ($ty:ident, $rows:literal, $cols:literal, $row_vec:ident, $col_vec:ident) => {
        impl $ty {
            /// All elements zero
            pub const ZERO: Self = Self { m: [0.0; $rows * $cols] };

            /// Build from a column-major element array
            #[must_use]
            pub const fn from_cols_array(m: [f32; $rows * $cols]) -> Self {
                Self { m }
            }

            /// Column-major element array
            #[must_use]
            pub const fn to_cols_array(&self) -> [f32; $rows * $cols] {
                self.m
            }

            /// Same as [`Self::to_cols_array`], used by the `approx` impls
            #[must_use]
            pub const fn to_array(&self) -> [f32; $rows * $cols] {
                self.m
            }

            /// Borrow the column-major storage, e.g. for a uniform upload
            #[must_use]
            pub const fn as_slice(&self) -> &[f32] {
                &self.m
            }

            /// Flat storage index of element `(row, col)`
            #[must_use]
            pub const fn index(row: usize, col: usize) -> usize {
                col * $rows + row
            }

            /// Element at `(row, col)`
            #[must_use]
            pub const fn at(&self, row: usize, col: usize) -> f32 {
                self.m[Self::index(row, col)]
            }

            /// Overwrite element `(row, col)`
            pub fn set(&mut self, row: usize, col: usize, value: f32) {
                self.m[Self::index(row, col)] = value;
            }

            /// Row `r` as a vector
            #[must_use]
            pub fn row(&self, r: usize) -> $row_vec {
                let mut out = $row_vec::ZERO;
                for c in 0..$cols {
                    out[c] = self.at(r, c);
                }
                out
            }

            /// Column `c` as a vector
            #[must_use]
            pub fn col(&self, c: usize) -> $col_vec {
                let mut out = $col_vec::ZERO;
                for r in 0..$rows {
                    out[r] = self.at(r, c);
                }
                out
            }

            /// Replace row `r`
            pub fn set_row(&mut self, r: usize, row: $row_vec) {
                for c in 0..$cols {
                    self.set(r, c, row[c]);
                }
            }

            /// Replace column `c`
            pub fn set_col(&mut self, c: usize, col: $col_vec) {
                for r in 0..$rows {
                    self.set(r, c, col[r]);
                }
            }

            /// Build from row vectors, top to bottom
            #[must_use]
            pub fn from_rows(rows: [$row_vec; $rows]) -> Self {
                let mut out = Self::ZERO;
                for (r, row) in rows.iter().enumerate() {
                    out.set_row(r, *row);
                }
                out
            }

            /// Build from column vectors, left to right
            #[must_use]
            pub fn from_cols(cols: [$col_vec; $cols]) -> Self {
                let mut out = Self::ZERO;
                for (c, col) in cols.iter().enumerate() {
                    out.set_col(c, *col);
                }
                out
            }

            /// Element-wise absolute value
            #[must_use]
            pub fn abs(&self) -> Self {
                Self { m: self.m.map(f32::abs) }
            }

            /// Every element within `epsilon` of the other's
            #[must_use]
            pub fn equal_threshold(&self, other: &Self, epsilon: f32) -> bool {
                self.m
                    .iter()
                    .zip(other.m.iter())
                    .all(|(a, b)| super::utils::float_equal_threshold(*a, *b, epsilon))
            }
        }

        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                let mut m = self.m;
                for (a, b) in m.iter_mut().zip(rhs.m.iter()) {
                    *a += b;
                }
                Self { m }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                let mut m = self.m;
                for (a, b) in m.iter_mut().zip(rhs.m.iter()) {
                    *a -= b;
                }
                Self { m }
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self { m: self.m.map(|v| v * rhs) }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for r in 0..$rows {
                    for c in 0..$cols {
                        if c > 0 {
                            write!(f, "\t")?;
                        }
                        write!(f, "{:.6}", self.at(r, c))?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }

        impl_approx_eq!($ty);
    };
}

pub(crate) use impl_matrix_common;

/// Operations that only make sense for square matrices.
macro_rules! impl_square_matrix {
    ($ty:ident, $n:literal, $vec:ident) => {
        impl_matrix_common!($ty, $n, $n, $vec, $vec);

        impl $ty {
            /// Identity matrix
            pub const IDENTITY: Self = {
                let mut m = [0.0; $n * $n];
                let mut i = 0;
                while i < $n {
                    m[i * $n + i] = 1.0;
                    i += 1;
                }
                Self { m }
            };

            /// Diagonal matrix with `diagonal` on the main diagonal
            #[must_use]
            pub fn from_diagonal(diagonal: $vec) -> Self {
                let mut out = Self::ZERO;
                for i in 0..$n {
                    out.set(i, i, diagonal[i]);
                }
                out
            }

            /// Main diagonal
            #[must_use]
            pub fn diagonal(&self) -> $vec {
                let mut out = $vec::ZERO;
                for i in 0..$n {
                    out[i] = self.at(i, i);
                }
                out
            }

            /// Sum of the main diagonal
            #[must_use]
            pub fn trace(&self) -> f32 {
                (0..$n).map(|i| self.at(i, i)).sum()
            }

            /// Rows become columns
            #[must_use]
            pub fn transpose(&self) -> Self {
                let mut out = Self::ZERO;
                for r in 0..$n {
                    for c in 0..$n {
                        out.set(c, r, self.at(r, c));
                    }
                }
                out
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl Mul for $ty {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                let mut out = Self::ZERO;
                for c in 0..$n {
                    for r in 0..$n {
                        let mut sum = 0.0;
                        for k in 0..$n {
                            sum += self.at(r, k) * rhs.at(k, c);
                        }
                        out.m[c * $n + r] = sum;
                    }
                }
                out
            }
        }

        impl MulAssign for $ty {
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl Mul<$vec> for $ty {
            type Output = $vec;
            fn mul(self, rhs: $vec) -> $vec {
                let mut out = $vec::ZERO;
                for r in 0..$n {
                    let mut sum = 0.0;
                    for k in 0..$n {
                        sum += self.at(r, k) * rhs[k];
                    }
                    out[r] = sum;
                }
                out
            }
        }
    };
}

/// 2x2 column-major matrix
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat2 {
    m: [f32; 4],
}

/// 3x3 column-major matrix
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat3 {
    m: [f32; 9],
}

/// 4x4 column-major matrix, the homogeneous transform used for world and
/// view/projection matrices
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    m: [f32; 16],
}

impl_square_matrix!(Mat2, 2, Vec2);
impl_square_matrix!(Mat3, 3, Vec3);
impl_square_matrix!(Mat4, 4, Vec4);

impl Mat2 {
    /// Determinant
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0] * m[3] - m[1] * m[2]
    }

    /// Inverse, or [`Mat2::ZERO`] when singular
    #[must_use]
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if is_singular(det) {
            return Self::ZERO;
        }
        let m = &self.m;
        Self::from_cols_array([m[3], -m[1], -m[2], m[0]]) * (1.0 / det)
    }

    /// Counter-clockwise rotation by `angle` radians
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([c, s, -s, c])
    }

    /// Embed in the upper-left of an identity 3x3
    #[must_use]
    pub const fn to_mat3(&self) -> Mat3 {
        let m = &self.m;
        Mat3::from_cols_array([m[0], m[1], 0.0, m[2], m[3], 0.0, 0.0, 0.0, 1.0])
    }

    /// Embed in the upper-left of an identity 4x4
    #[must_use]
    pub const fn to_mat4(&self) -> Mat4 {
        self.to_mat3().to_mat4()
    }
}

impl Mat3 {
    /// Determinant
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0] * m[4] * m[8] + m[3] * m[7] * m[2] + m[6] * m[1] * m[5]
            - m[6] * m[4] * m[2]
            - m[3] * m[1] * m[8]
            - m[0] * m[7] * m[5]
    }

    /// Inverse via the adjugate, or [`Mat3::ZERO`] when singular
    #[must_use]
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if is_singular(det) {
            return Self::ZERO;
        }
        let m = &self.m;
        let adjugate = Self::from_cols_array([
            m[4] * m[8] - m[5] * m[7],
            m[2] * m[7] - m[1] * m[8],
            m[1] * m[5] - m[2] * m[4],
            m[5] * m[6] - m[3] * m[8],
            m[0] * m[8] - m[2] * m[6],
            m[2] * m[3] - m[0] * m[5],
            m[3] * m[7] - m[4] * m[6],
            m[1] * m[6] - m[0] * m[7],
            m[0] * m[4] - m[1] * m[3],
        ]);
        adjugate * (1.0 / det)
    }

    /// Rotation matrix of a unit quaternion
    #[must_use]
    pub fn from_quat(q: Quat) -> Self {
        q.to_mat3()
    }

    /// `selfᵀ * v` without building the transpose
    #[must_use]
    pub fn mul_transpose_vec(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.col(0).dot(v), self.col(1).dot(v), self.col(2).dot(v))
    }

    /// Embed in the upper-left of an identity 4x4
    #[must_use]
    pub const fn to_mat4(&self) -> Mat4 {
        let m = &self.m;
        Mat4::from_cols_array([
            m[0], m[1], m[2], 0.0, //
            m[3], m[4], m[5], 0.0, //
            m[6], m[7], m[8], 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Use as the linear part of an affine 3D transform with no translation
    #[must_use]
    pub const fn to_mat3x4(&self) -> Mat3x4 {
        let m = &self.m;
        Mat3x4::from_cols_array([
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], 0.0, 0.0, 0.0,
        ])
    }

    /// Upper-left 2x2 block
    #[must_use]
    pub const fn truncate_mat2(&self) -> Mat2 {
        let m = &self.m;
        Mat2::from_cols_array([m[0], m[1], m[3], m[4]])
    }

    /// Top two rows, read as a homogeneous 2D affine transform
    #[must_use]
    pub const fn truncate_mat2x3(&self) -> Mat2x3 {
        let m = &self.m;
        Mat2x3::from_cols_array([m[0], m[1], m[3], m[4], m[6], m[7]])
    }
}

impl Mat4 {
    /// Determinant via 2x2 sub-determinant expansion
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let (s, c) = self.sub_determinants();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Inverse via closed-form cofactors, or [`Mat4::ZERO`] when singular
    #[must_use]
    pub fn inverse(&self) -> Self {
        let (s, c) = self.sub_determinants();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if is_singular(det) {
            return Self::ZERO;
        }
        let a = |r: usize, col: usize| self.at(r, col);

        let rows = [
            [
                a(1, 1) * c[5] - a(1, 2) * c[4] + a(1, 3) * c[3],
                -a(0, 1) * c[5] + a(0, 2) * c[4] - a(0, 3) * c[3],
                a(3, 1) * s[5] - a(3, 2) * s[4] + a(3, 3) * s[3],
                -a(2, 1) * s[5] + a(2, 2) * s[4] - a(2, 3) * s[3],
            ],
            [
                -a(1, 0) * c[5] + a(1, 2) * c[2] - a(1, 3) * c[1],
                a(0, 0) * c[5] - a(0, 2) * c[2] + a(0, 3) * c[1],
                -a(3, 0) * s[5] + a(3, 2) * s[2] - a(3, 3) * s[1],
                a(2, 0) * s[5] - a(2, 2) * s[2] + a(2, 3) * s[1],
            ],
            [
                a(1, 0) * c[4] - a(1, 1) * c[2] + a(1, 3) * c[0],
                -a(0, 0) * c[4] + a(0, 1) * c[2] - a(0, 3) * c[0],
                a(3, 0) * s[4] - a(3, 1) * s[2] + a(3, 3) * s[0],
                -a(2, 0) * s[4] + a(2, 1) * s[2] - a(2, 3) * s[0],
            ],
            [
                -a(1, 0) * c[3] + a(1, 1) * c[1] - a(1, 2) * c[0],
                a(0, 0) * c[3] - a(0, 1) * c[1] + a(0, 2) * c[0],
                -a(3, 0) * s[3] + a(3, 1) * s[1] - a(3, 2) * s[0],
                a(2, 0) * s[3] - a(2, 1) * s[1] + a(2, 2) * s[0],
            ],
        ];

        let inv_det = 1.0 / det;
        let mut out = Self::ZERO;
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                out.set(r, col, value * inv_det);
            }
        }
        out
    }

    /// 2x2 determinants of the top two rows (`s`) and bottom two rows (`c`)
    fn sub_determinants(&self) -> ([f32; 6], [f32; 6]) {
        let a = |r: usize, c: usize| self.at(r, c);
        let s = [
            a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1),
            a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2),
            a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3),
            a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2),
            a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3),
            a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3),
        ];
        let c = [
            a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1),
            a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2),
            a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3),
            a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2),
            a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3),
            a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3),
        ];
        (s, c)
    }

    /// Homogeneous translation
    #[must_use]
    pub const fn from_translation(t: Vec3) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            t.x, t.y, t.z, 1.0,
        ])
    }

    /// Homogeneous non-uniform scale
    #[must_use]
    pub const fn from_scale(s: Vec3) -> Self {
        Self::from_cols_array([
            s.x, 0.0, 0.0, 0.0, //
            0.0, s.y, 0.0, 0.0, //
            0.0, 0.0, s.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians about +X
    #[must_use]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians about +Y
    #[must_use]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians about +Z
    #[must_use]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians about an arbitrary axis
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Quat::from_axis_angle(axis, angle).to_mat4()
    }

    /// Transform a point (w = 1); the result is not divided by w
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * p.extend(1.0)).truncate()
    }

    /// Transform a direction (w = 0)
    #[must_use]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * v.extend(0.0)).truncate()
    }

    /// Upper-left 3x3 block
    #[must_use]
    pub const fn truncate_mat3(&self) -> Mat3 {
        let m = &self.m;
        Mat3::from_cols_array([m[0], m[1], m[2], m[4], m[5], m[6], m[8], m[9], m[10]])
    }

    /// Upper-left 2x2 block
    #[must_use]
    pub const fn truncate_mat2(&self) -> Mat2 {
        let m = &self.m;
        Mat2::from_cols_array([m[0], m[1], m[4], m[5]])
    }

    /// Drop the bottom row, keeping the affine part
    #[must_use]
    pub const fn to_mat3x4(&self) -> Mat3x4 {
        let m = &self.m;
        Mat3x4::from_cols_array([
            m[0], m[1], m[2], m[4], m[5], m[6], m[8], m[9], m[10], m[12], m[13], m[14],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn sample_mat4() -> Mat4 {
        Mat4::from_cols_array([
            2.0, 0.5, 0.0, 0.0, //
            -1.0, 3.0, 0.25, 0.0, //
            0.0, 1.0, 4.0, 0.0, //
            5.0, -2.0, 7.0, 1.0,
        ])
    }

    #[test]
    fn test_column_major_indexing() {
        let m = Mat3::from_cols_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(Mat3::index(0, 1), 3);
        assert_relative_eq!(m.at(0, 1), 4.0);
        assert_relative_eq!(m.at(2, 0), 3.0);
        assert_eq!(m.col(2), Vec3::new(7.0, 8.0, 9.0));
        assert_eq!(m.row(0), Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(Mat4::index(3, 2), 11);
    }

    #[test]
    fn test_rows_and_cols_builders() {
        let by_rows = Mat2::from_rows([Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
        let by_cols = Mat2::from_cols([Vec2::new(1.0, 3.0), Vec2::new(2.0, 4.0)]);
        assert_eq!(by_rows, by_cols);
        assert_eq!(by_rows.transpose().row(0), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_identity_and_default() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        assert_relative_eq!(Mat3::IDENTITY.trace(), 3.0);
        assert_eq!(Mat4::IDENTITY * sample_mat4(), sample_mat4());
        assert_eq!(sample_mat4() * Mat4::IDENTITY, sample_mat4());
    }

    #[test]
    fn test_mat2_inverse() {
        let m = Mat2::from_cols_array([4.0, 2.0, 7.0, 6.0]);
        assert_relative_eq!(m.determinant(), 10.0);
        assert_relative_eq!(m * m.inverse(), Mat2::IDENTITY, epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = Mat3::from_cols_array([1.0, 0.0, 5.0, 2.0, 1.0, 6.0, 3.0, 4.0, 0.0]);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(m * m.inverse(), Mat3::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(m.inverse() * m, Mat3::IDENTITY, epsilon = EPSILON);
    }

    #[test]
    fn test_mat4_inverse_matches_nalgebra() {
        let m = sample_mat4();
        let ours = m.inverse();
        let theirs: Mat4 = nalgebra::Matrix4::<f32>::from(m)
            .try_inverse()
            .map(Mat4::from)
            .unwrap();
        assert_relative_eq!(ours, theirs, epsilon = 1e-5);
        assert_relative_eq!(m * ours, Mat4::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(
            m.determinant(),
            nalgebra::Matrix4::<f32>::from(m).determinant(),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_translation_inverse() {
        let t = Mat4::from_translation(Vec3::new(3.0, -4.0, 5.0));
        assert_eq!(t.inverse(), Mat4::from_translation(Vec3::new(-3.0, 4.0, -5.0)));
    }

    #[test]
    fn test_singular_inverse_is_zero() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), Mat4::ZERO);
        assert_eq!(Mat3::ZERO.inverse(), Mat3::ZERO);
        assert_eq!(Mat2::from_cols_array([1.0, 2.0, 2.0, 4.0]).inverse(), Mat2::ZERO);
    }

    #[test]
    fn test_small_but_regular_matrix_is_invertible() {
        let m = Mat4::from_scale(Vec3::splat(0.01));
        assert_relative_eq!(m * m.inverse(), Mat4::IDENTITY, epsilon = 1e-4);
    }

    #[test]
    fn test_product_matches_nalgebra() {
        let a = sample_mat4();
        let b = Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::new(1.0, 2.0, 3.0));
        let expected = Mat4::from(nalgebra::Matrix4::<f32>::from(a) * nalgebra::Matrix4::<f32>::from(b));
        assert_relative_eq!(a * b, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_matrix_vector_product() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t * Vec4::new(1.0, 1.0, 1.0, 1.0), Vec4::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(t.transform_vector(Vec3::X), Vec3::X);
        assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_axis_rotations() {
        let quarter = std::f32::consts::FRAC_PI_2;
        assert_relative_eq!(
            Mat4::from_rotation_z(quarter).transform_point(Vec3::X),
            Vec3::Y,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat4::from_rotation_x(quarter).transform_point(Vec3::Y),
            Vec3::Z,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat4::from_rotation_y(quarter).transform_point(Vec3::Z),
            Vec3::X,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat4::from_axis_angle(Vec3::Y, quarter),
            Mat4::from_rotation_y(quarter),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_embeddings() {
        let m2 = Mat2::from_cols_array([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m2.to_mat4().truncate_mat2(), m2);
        assert_eq!(m2.to_mat3().truncate_mat2(), m2);

        let m4 = sample_mat4();
        assert_eq!(m4.to_mat3x4().to_mat4(), m4);
        assert_eq!(m4.truncate_mat3().to_mat4().truncate_mat3(), m4.truncate_mat3());
        assert_relative_eq!(
            m4.to_mat3x4().transform_point(Vec3::ONE),
            m4.transform_point(Vec3::ONE),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_elementwise_ops_and_threshold() {
        let a = Mat2::from_cols_array([1.0, -2.0, 3.0, -4.0]);
        assert_eq!(a + a, a * 2.0);
        assert_eq!(a - a, Mat2::ZERO);
        assert_eq!(a.abs(), Mat2::from_cols_array([1.0, 2.0, 3.0, 4.0]));
        let nudged = a + Mat2::from_cols_array([1e-7; 4]);
        assert!(a.equal_threshold(&nudged, EPSILON));
        assert!(!a.equal_threshold(&(a * 1.1), EPSILON));
    }

    #[test]
    fn test_mul_transpose_vec() {
        let m = Mat3::from_cols_array([1.0, 0.0, 5.0, 2.0, 1.0, 6.0, 3.0, 4.0, 0.0]);
        let v = Vec3::new(1.0, -1.0, 2.0);
        assert_eq!(m.mul_transpose_vec(v), m.transpose() * v);
    }

    #[test]
    fn test_display_prints_rows() {
        let text = Mat2::from_rows([Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]).to_string();
        assert_eq!(text, "1.000000\t2.000000\n3.000000\t4.000000\n");
    }
}
