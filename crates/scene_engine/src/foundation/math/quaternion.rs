//! Rotation quaternions and Euler angle conversion
//!
//! A [`Quat`] is stored as a scalar part `w` and a vector part `v`. Only unit
//! quaternions represent rotations; constructors here produce unit
//! quaternions and [`Quat::normalize`] restores the invariant after drift.
//!
//! Multiplication is the Hamilton product. For `a * b`, rotating a vector by
//! the product applies `b` first and `a` second.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};

use super::utils::{clamp, float_equal};
use super::{constants, Mat3, Mat4, MathError, Vec3, EPSILON};

/// Above this dot product [`Quat::slerp`] falls back to [`Quat::nlerp`]
const SLERP_NLERP_THRESHOLD: f32 = 0.9995;

/// Tolerance used by [`Quat::between_vectors`] to detect opposite vectors
const OPPOSITE_EPSILON: f32 = 0.001;

/// Axis sequence for [`Quat::from_euler_angles`]
///
/// `XZX` means the first angle turns about X, the second about Z and the
/// third about X again. Variants are listed in their index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationOrder {
    /// X, Y, X
    XYX,
    /// X, Y, Z
    XYZ,
    /// X, Z, X
    XZX,
    /// X, Z, Y
    XZY,
    /// Y, X, Y
    YXY,
    /// Y, X, Z
    YXZ,
    /// Y, Z, Y
    YZY,
    /// Y, Z, X
    YZX,
    /// Z, Y, Z
    ZYZ,
    /// Z, Y, X
    ZYX,
    /// Z, X, Z
    ZXZ,
    /// Z, X, Y
    ZXY,
}

impl RotationOrder {
    /// Every order, in index order
    pub const ALL: [Self; 12] = [
        Self::XYX,
        Self::XYZ,
        Self::XZX,
        Self::XZY,
        Self::YXY,
        Self::YXZ,
        Self::YZY,
        Self::YZX,
        Self::ZYZ,
        Self::ZYX,
        Self::ZXZ,
        Self::ZXY,
    ];

    /// Order at `index`
    ///
    /// # Panics
    ///
    /// Panics when `index` does not name one of the twelve orders. Use
    /// `RotationOrder::try_from` for untrusted input.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        match Self::try_from(index) {
            Ok(order) => order,
            Err(err) => panic!("{err}"),
        }
    }

    /// Upper-case axis name, e.g. `"ZYX"`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::XYX => "XYX",
            Self::XYZ => "XYZ",
            Self::XZX => "XZX",
            Self::XZY => "XZY",
            Self::YXY => "YXY",
            Self::YXZ => "YXZ",
            Self::YZY => "YZY",
            Self::YZX => "YZX",
            Self::ZYZ => "ZYZ",
            Self::ZYX => "ZYX",
            Self::ZXZ => "ZXZ",
            Self::ZXY => "ZXY",
        }
    }
}

impl TryFrom<u8> for RotationOrder {
    type Error = MathError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| MathError::InvalidRotationOrder(index.to_string()))
    }
}

impl FromStr for RotationOrder {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|order| order.name() == upper)
            .ok_or_else(|| MathError::InvalidRotationOrder(s.to_string()))
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quaternion with scalar part `w` and vector part `v`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Quat {
    /// Scalar part
    pub w: f32,
    /// Vector part
    pub v: Vec3,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// The no-rotation quaternion `(1, 0, 0, 0)`
    pub const IDENTITY: Self = Self::new(1.0, Vec3::ZERO);

    /// Create from scalar and vector parts
    #[must_use]
    pub const fn new(w: f32, v: Vec3) -> Self {
        Self { w, v }
    }

    /// Components as `[w, x, y, z]`
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.w, self.v.x, self.v.y, self.v.z]
    }

    /// X component of the vector part
    #[must_use]
    pub const fn x(self) -> f32 {
        self.v.x
    }

    /// Y component of the vector part
    #[must_use]
    pub const fn y(self) -> f32 {
        self.v.y
    }

    /// Z component of the vector part
    #[must_use]
    pub const fn z(self) -> f32 {
        self.v.z
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// The axis is normalized first. A zero axis yields the identity.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        if axis.length_squared() <= 0.0 {
            return Self::IDENTITY;
        }
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis.normalize() * s)
    }

    /// Rotation about the X axis
    #[must_use]
    pub fn from_rotation_x(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::X, angle)
    }

    /// Rotation about the Y axis
    #[must_use]
    pub fn from_rotation_y(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::Y, angle)
    }

    /// Rotation about the Z axis
    #[must_use]
    pub fn from_rotation_z(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::Z, angle)
    }

    /// Compose three angles about the axes named by `order`
    #[must_use]
    #[rustfmt::skip]
    pub fn from_euler_angles(angle1: f32, angle2: f32, angle3: f32, order: RotationOrder) -> Self {
        let (s0, c0) = (angle1 * 0.5).sin_cos();
        let (s1, c1) = (angle2 * 0.5).sin_cos();
        let (s2, c2) = (angle3 * 0.5).sin_cos();

        let (w, x, y, z) = match order {
            RotationOrder::ZYX => (
                c0 * c1 * c2 + s0 * s1 * s2,
                c0 * c1 * s2 - s0 * s1 * c2,
                c0 * s1 * c2 + s0 * c1 * s2,
                s0 * c1 * c2 - c0 * s1 * s2,
            ),
            RotationOrder::ZYZ => (
                c0 * c1 * c2 - s0 * c1 * s2,
                c0 * s1 * s2 - s0 * s1 * c2,
                c0 * s1 * c2 + s0 * s1 * s2,
                s0 * c1 * c2 + c0 * c1 * s2,
            ),
            RotationOrder::ZXY => (
                c0 * c1 * c2 - s0 * s1 * s2,
                c0 * s1 * c2 - s0 * c1 * s2,
                c0 * c1 * s2 + s0 * s1 * c2,
                c0 * s1 * s2 + s0 * c1 * c2,
            ),
            RotationOrder::ZXZ => (
                c0 * c1 * c2 - s0 * c1 * s2,
                c0 * s1 * c2 + s0 * s1 * s2,
                s0 * s1 * c2 - c0 * s1 * s2,
                c0 * c1 * s2 + s0 * c1 * c2,
            ),
            RotationOrder::YXZ => (
                c0 * c1 * c2 + s0 * s1 * s2,
                c0 * s1 * c2 + s0 * c1 * s2,
                s0 * c1 * c2 - c0 * s1 * s2,
                c0 * c1 * s2 - s0 * s1 * c2,
            ),
            RotationOrder::YXY => (
                c0 * c1 * c2 - s0 * c1 * s2,
                c0 * s1 * c2 + s0 * s1 * s2,
                s0 * c1 * c2 + c0 * c1 * s2,
                c0 * s1 * s2 - s0 * s1 * c2,
            ),
            RotationOrder::YZX => (
                c0 * c1 * c2 - s0 * s1 * s2,
                c0 * c1 * s2 + s0 * s1 * c2,
                c0 * s1 * s2 + s0 * c1 * c2,
                c0 * s1 * c2 - s0 * c1 * s2,
            ),
            RotationOrder::YZY => (
                c0 * c1 * c2 - s0 * c1 * s2,
                s0 * s1 * c2 - c0 * s1 * s2,
                c0 * c1 * s2 + s0 * c1 * c2,
                c0 * s1 * c2 + s0 * s1 * s2,
            ),
            RotationOrder::XYZ => (
                c0 * c1 * c2 - s0 * s1 * s2,
                c0 * s1 * s2 + s0 * c1 * c2,
                c0 * s1 * c2 - s0 * c1 * s2,
                c0 * c1 * s2 + s0 * s1 * c2,
            ),
            RotationOrder::XYX => (
                c0 * c1 * c2 - s0 * c1 * s2,
                c0 * c1 * s2 + s0 * c1 * c2,
                c0 * s1 * c2 + s0 * s1 * s2,
                s0 * s1 * c2 - c0 * s1 * s2,
            ),
            RotationOrder::XZY => (
                c0 * c1 * c2 + s0 * s1 * s2,
                s0 * c1 * c2 - c0 * s1 * s2,
                c0 * c1 * s2 - s0 * s1 * c2,
                c0 * s1 * c2 + s0 * c1 * s2,
            ),
            RotationOrder::XZX => (
                c0 * c1 * c2 - s0 * c1 * s2,
                c0 * c1 * s2 + s0 * c1 * c2,
                c0 * s1 * s2 - s0 * s1 * c2,
                c0 * s1 * c2 + s0 * s1 * s2,
            ),
        };
        Self::new(w, Vec3::new(x, y, z))
    }

    /// Quaternion of the rotation part of a 3x3 matrix
    #[must_use]
    pub fn from_mat3(m: &Mat3) -> Self {
        Self::from_rotation_elements([
            [m.at(0, 0), m.at(0, 1), m.at(0, 2)],
            [m.at(1, 0), m.at(1, 1), m.at(1, 2)],
            [m.at(2, 0), m.at(2, 1), m.at(2, 2)],
        ])
    }

    /// Quaternion of the upper-left rotation block of a 4x4 matrix
    #[must_use]
    pub fn from_mat4(m: &Mat4) -> Self {
        Self::from_mat3(&m.truncate_mat3())
    }

    /// Trace-based extraction from row-major rotation elements `r[row][col]`
    fn from_rotation_elements(r: [[f32; 3]; 3]) -> Self {
        let trace = r[0][0] + r[1][1] + r[2][2];
        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            return Self::new(
                0.25 / s,
                Vec3::new((r[2][1] - r[1][2]) * s, (r[0][2] - r[2][0]) * s, (r[1][0] - r[0][1]) * s),
            );
        }
        if r[0][0] > r[1][1] && r[0][0] > r[2][2] {
            let s = 2.0 * (1.0 + r[0][0] - r[1][1] - r[2][2]).sqrt();
            return Self::new(
                (r[2][1] - r[1][2]) / s,
                Vec3::new(0.25 * s, (r[0][1] + r[1][0]) / s, (r[0][2] + r[2][0]) / s),
            );
        }
        if r[1][1] > r[2][2] {
            let s = 2.0 * (1.0 + r[1][1] - r[0][0] - r[2][2]).sqrt();
            return Self::new(
                (r[0][2] - r[2][0]) / s,
                Vec3::new((r[0][1] + r[1][0]) / s, 0.25 * s, (r[1][2] + r[2][1]) / s),
            );
        }
        let s = 2.0 * (1.0 + r[2][2] - r[0][0] - r[1][1]).sqrt();
        Self::new(
            (r[1][0] - r[0][1]) / s,
            Vec3::new((r[0][2] + r[2][0]) / s, (r[1][2] + r[2][1]) / s, 0.25 * s),
        )
    }

    /// Shortest rotation taking direction `start` onto direction `dest`
    ///
    /// Opposite vectors have no unique answer; a half turn about an axis
    /// perpendicular to `start` is returned.
    #[must_use]
    pub fn between_vectors(start: Vec3, dest: Vec3) -> Self {
        let sn = start.normalize();
        let dn = dest.normalize();
        let cos_theta = sn.dot(dn);

        if cos_theta < -1.0 + OPPOSITE_EPSILON {
            let mut axis = Vec3::X.cross(start);
            if axis.length_squared() < OPPOSITE_EPSILON {
                axis = Vec3::Y.cross(start);
            }
            return Self::from_axis_angle(axis, constants::PI);
        }

        let axis = sn.cross(dn);
        let s = ((1.0 + cos_theta) * 2.0).sqrt();
        Self::new(s * 0.5, axis * (1.0 / s))
    }

    /// Orientation turning an object at `eye` toward `center`
    ///
    /// The object's front is taken as `-Z` and its up as `+Y`.
    #[must_use]
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let direction = (center - eye).normalize();
        let rot_dir = Self::between_vectors(-Vec3::Z, direction);
        let current_up = rot_dir.rotate(Vec3::Y);
        let rot_up = Self::between_vectors(current_up, up);
        rot_up * rot_dir
    }

    /// Four-component dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.w * other.w + self.v.dot(other.v)
    }

    /// Euclidean length
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Alias for [`Quat::length`]
    #[must_use]
    pub fn norm(self) -> f32 {
        self.length()
    }

    /// Unit-length copy
    ///
    /// Already-unit input is returned unchanged, zero length yields the
    /// identity and an infinite length is clamped to `f32::MAX`.
    #[must_use]
    pub fn normalize(self) -> Self {
        let mut length = self.length();
        if float_equal(1.0, length) {
            return self;
        }
        if length <= 0.0 {
            return Self::IDENTITY;
        }
        if length.is_infinite() {
            length = f32::MAX;
        }
        self * (1.0 / length)
    }

    /// Conjugate: negated vector part
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.v)
    }

    /// Multiplicative inverse: conjugate divided by squared length
    #[must_use]
    pub fn inverse(self) -> Self {
        self.conjugate() * (1.0 / self.dot(self))
    }

    /// Rotate `v` using `v + 2w(q×v) + 2q×(q×v)`
    #[must_use]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let cross = self.v.cross(v);
        v + cross * (2.0 * self.w) + (self.v * 2.0).cross(cross)
    }

    /// 3x3 rotation matrix
    #[must_use]
    #[rustfmt::skip]
    pub fn to_mat3(self) -> Mat3 {
        let (w, x, y, z) = (self.w, self.v.x, self.v.y, self.v.z);
        Mat3::from_cols_array([
            1.0 - 2.0 * y * y - 2.0 * z * z, 2.0 * x * y + 2.0 * w * z, 2.0 * x * z - 2.0 * w * y,
            2.0 * x * y - 2.0 * w * z, 1.0 - 2.0 * x * x - 2.0 * z * z, 2.0 * y * z + 2.0 * w * x,
            2.0 * x * z + 2.0 * w * y, 2.0 * y * z - 2.0 * w * x, 1.0 - 2.0 * x * x - 2.0 * y * y,
        ])
    }

    /// 4x4 homogeneous rotation matrix
    #[must_use]
    pub fn to_mat4(self) -> Mat4 {
        self.to_mat3().to_mat4()
    }

    /// Component-wise linear interpolation; the result is not normalized
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Normalized linear interpolation
    #[must_use]
    pub fn nlerp(self, other: Self, t: f32) -> Self {
        self.lerp(other, t).normalize()
    }

    /// Spherical linear interpolation at constant angular velocity
    ///
    /// Inputs are normalized first. Nearly parallel inputs use
    /// [`Quat::nlerp`]. No sign flip is applied, so `t = 1` reproduces `other`
    /// exactly even when the path is the long way round. For opposite inputs
    /// the path runs through an arbitrary quaternion orthogonal to `self`.
    #[must_use]
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let n1 = self.normalize();
        let n2 = other.normalize();
        let dot = n1.dot(n2);

        if dot > SLERP_NLERP_THRESHOLD {
            return n1.nlerp(n2, t);
        }

        let dot = clamp(dot, -1.0, 1.0);

        // Second projection: the first one loses most bits when dot ~ -1
        let mut relative = n2 - n1 * dot;
        relative = relative - n1 * n1.dot(relative);
        let sin_angle = relative.length();
        let angle = sin_angle.atan2(dot);
        let relative = if sin_angle <= EPSILON {
            n1.orthogonal()
        } else {
            relative * (1.0 / sin_angle)
        };

        let (s, c) = (angle * t).sin_cos();
        n1 * c + relative * s
    }

    /// Unit quaternion perpendicular to `self` in 4D
    fn orthogonal(self) -> Self {
        Self::new(-self.v.x, Vec3::new(self.w, -self.v.z, self.v.y))
    }

    /// Integrate an angular velocity `v` over a time step `scale`
    ///
    /// The result drifts off unit length; normalize periodically.
    #[must_use]
    pub fn add_scaled_vec(self, scale: f32, v: Vec3) -> Self {
        let spin = Self::new(0.0, v * scale) * self;
        self + spin * 0.5
    }

    /// Every component within `epsilon` of the other's
    #[must_use]
    pub fn equal_threshold(self, other: Self, epsilon: f32) -> bool {
        super::utils::float_equal_threshold(self.w, other.w, epsilon)
            && self.v.equal_threshold(other.v, epsilon)
    }

    /// Same orientation, treating `q` and `-q` as equal
    #[must_use]
    pub fn orientation_eq(self, other: Self) -> bool {
        self.orientation_eq_threshold(other, EPSILON)
    }

    /// Same orientation within `epsilon`, treating `q` and `-q` as equal
    #[must_use]
    pub fn orientation_eq_threshold(self, other: Self, epsilon: f32) -> bool {
        self.normalize().dot(other.normalize()).abs() > 1.0 - epsilon
    }
}

impl Add for Quat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.w + rhs.w, self.v + rhs.v)
    }
}

impl Sub for Quat {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.w - rhs.w, self.v - rhs.v)
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.w, -self.v)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.w * rhs, self.v * rhs)
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.v.dot(rhs.v),
            self.v.cross(rhs.v) + rhs.v * self.w + self.v * rhs.w,
        )
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}

impl_approx_eq!(Quat);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(Quat::IDENTITY.rotate(v), v);
        assert_eq!(Quat::default(), Quat::IDENTITY);
        assert_eq!(Quat::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_axis_angle_rotation() {
        let q = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        assert_relative_eq!(q.rotate(Vec3::X), Vec3::Y, epsilon = EPSILON);
        assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_axis_is_normalized() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 5.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(q, Quat::from_rotation_y(FRAC_PI_2), epsilon = EPSILON);
        assert_eq!(Quat::from_axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    }

    #[test]
    fn test_hamilton_product_order() {
        let about_x = Quat::from_rotation_x(FRAC_PI_2);
        let about_z = Quat::from_rotation_z(FRAC_PI_2);
        // about_x applied first, then about_z
        let combined = about_z * about_x;
        let v = combined.rotate(Vec3::Y);
        assert_relative_eq!(v, about_z.rotate(about_x.rotate(Vec3::Y)), epsilon = EPSILON);
        assert_relative_eq!(v, Vec3::Z, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_matches_nalgebra() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 1.1);
        let v = Vec3::new(0.3, -4.0, 2.0);
        let theirs = nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::<f32>::from(q))
            * nalgebra::Vector3::<f32>::from(v);
        assert_relative_eq!(q.rotate(v), Vec3::from(theirs), epsilon = 1e-5);
        assert_relative_eq!(q.to_mat3() * v, q.rotate(v), epsilon = 1e-5);
    }

    #[test]
    fn test_normalize_edge_cases() {
        assert_eq!(Quat::new(0.0, Vec3::ZERO).normalize(), Quat::IDENTITY);
        let unit = Quat::from_rotation_y(0.3);
        assert_eq!(unit.normalize(), unit);
        let scaled = (unit * 3.0).normalize();
        assert_relative_eq!(scaled, unit, epsilon = EPSILON);
        let tiny = Quat::new(5e-7, Vec3::new(0.0, 5e-7, 0.0)).normalize();
        assert_relative_eq!(tiny, Quat::new(FRAC_1_SQRT_2, Vec3::new(0.0, FRAC_1_SQRT_2, 0.0)), epsilon = EPSILON);
        let huge = Quat::new(f32::INFINITY, Vec3::ZERO).normalize();
        assert!(huge.w.is_infinite());
    }

    #[test]
    fn test_inverse_and_conjugate() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.8);
        assert_relative_eq!(q * q.inverse(), Quat::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(q.conjugate(), q.inverse(), epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_endpoints() {
        let q1 = Quat::from_rotation_x(0.2);
        let q2 = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 1.0), 2.5);
        assert_relative_eq!(q1.slerp(q2, 0.0), q1, epsilon = EPSILON);
        assert_relative_eq!(q1.slerp(q2, 1.0), q2, epsilon = 1e-5);
    }

    #[test]
    fn test_slerp_midpoint_is_half_angle() {
        let q1 = Quat::IDENTITY;
        let q2 = Quat::from_rotation_z(FRAC_PI_2);
        let mid = q1.slerp(q2, 0.5);
        assert_relative_eq!(mid, Quat::from_rotation_z(FRAC_PI_2 * 0.5), epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_stays_unit_length() {
        let q1 = Quat::from_rotation_x(0.4);
        let pairs = [
            (q1, Quat::from_axis_angle(Vec3::new(1.0, -2.0, 0.5), 2.9)),
            (q1, -q1),
            (q1, -(q1 * Quat::from_rotation_y(1e-6))),
            (q1, -(q1 * Quat::from_rotation_z(0.01))),
        ];
        for (a, b) in pairs {
            for step in 0..=20u8 {
                let t = f32::from(step) / 20.0;
                let q = a.slerp(b, t);
                assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
            }
            assert_relative_eq!(a.slerp(b, 0.0), a, epsilon = EPSILON);
            assert_relative_eq!(a.slerp(b, 1.0), b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_slerp_near_parallel_uses_nlerp() {
        let q1 = Quat::from_rotation_y(0.001);
        let q2 = Quat::from_rotation_y(0.002);
        assert_relative_eq!(q1.slerp(q2, 0.5), q1.nlerp(q2, 0.5), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_single_axis_orders() {
        let a = 0.7;
        assert_relative_eq!(
            Quat::from_euler_angles(a, 0.0, 0.0, RotationOrder::ZYX),
            Quat::from_rotation_z(a),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Quat::from_euler_angles(0.0, a, 0.0, RotationOrder::XYZ),
            Quat::from_rotation_y(a),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Quat::from_euler_angles(0.0, 0.0, a, RotationOrder::YZX),
            Quat::from_rotation_x(a),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_euler_orders_are_unit_and_distinct() {
        let (a1, a2, a3) = (0.3, -0.9, 1.4);
        let results: Vec<Quat> = RotationOrder::ALL
            .iter()
            .map(|order| Quat::from_euler_angles(a1, a2, a3, *order))
            .collect();
        for q in &results {
            assert_relative_eq!(q.length(), 1.0, epsilon = 1e-5);
        }
        assert!(!results[1].orientation_eq(results[9]));
    }

    #[test]
    fn test_euler_zyx_is_z_then_y_then_x_intrinsic() {
        let (yaw, pitch, roll) = (0.4, -0.3, 1.2);
        let q = Quat::from_euler_angles(yaw, pitch, roll, RotationOrder::ZYX);
        let expected =
            Quat::from_rotation_z(yaw) * Quat::from_rotation_y(pitch) * Quat::from_rotation_x(roll);
        assert!(q.orientation_eq_threshold(expected, 1e-5));
    }

    #[test]
    fn test_rotation_order_parsing() {
        assert_eq!("zyx".parse::<RotationOrder>(), Ok(RotationOrder::ZYX));
        assert_eq!(RotationOrder::try_from(1), Ok(RotationOrder::XYZ));
        assert_eq!(RotationOrder::from_index(11), RotationOrder::ZXY);
        assert!(matches!(
            "XXY".parse::<RotationOrder>(),
            Err(MathError::InvalidRotationOrder(_))
        ));
        assert!(RotationOrder::try_from(12).is_err());
        assert_eq!(RotationOrder::YXZ.to_string(), "YXZ");
    }

    #[test]
    #[should_panic(expected = "Invalid rotation order")]
    fn test_rotation_order_from_bad_index_panics() {
        let _ = RotationOrder::from_index(42);
    }

    #[test]
    fn test_matrix_round_trip_all_branches() {
        let samples = [
            Quat::from_rotation_x(0.3),
            Quat::from_rotation_x(PI * 0.95),
            Quat::from_rotation_y(PI * 0.95),
            Quat::from_rotation_z(PI * 0.95),
            Quat::from_axis_angle(Vec3::new(1.0, -2.0, 0.5), 2.0),
        ];
        for q in samples {
            assert!(Quat::from_mat4(&q.to_mat4()).orientation_eq_threshold(q, 1e-5));
            assert!(Quat::from_mat3(&q.to_mat3()).orientation_eq_threshold(q, 1e-5));
        }
    }

    #[test]
    fn test_between_vectors() {
        let q = Quat::between_vectors(Vec3::X, Vec3::Y);
        assert_relative_eq!(q.rotate(Vec3::X), Vec3::Y, epsilon = EPSILON);

        let opposite = Quat::between_vectors(Vec3::X, -Vec3::X);
        assert_relative_eq!(opposite.rotate(Vec3::X), -Vec3::X, epsilon = EPSILON);

        let opposite_y = Quat::between_vectors(Vec3::Y, -Vec3::Y);
        assert_relative_eq!(opposite_y.rotate(Vec3::Y), -Vec3::Y, epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_points_front_at_target() {
        let q = Quat::look_at(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::Y);
        assert_relative_eq!(q.rotate(-Vec3::Z), Vec3::X, epsilon = 1e-5);
        assert_relative_eq!(q.rotate(Vec3::Y), Vec3::Y, epsilon = 1e-5);
    }

    #[test]
    fn test_orientation_eq_ignores_sign() {
        let q = Quat::from_rotation_z(1.0);
        assert!(q.orientation_eq(-q));
        assert!(!q.orientation_eq(Quat::from_rotation_z(1.1)));
        assert!(q.equal_threshold(q * 1.0000001, EPSILON));
    }

    #[test]
    fn test_add_scaled_vec_integrates_spin() {
        let omega = Vec3::new(0.0, 0.0, 1.0);
        let mut q = Quat::IDENTITY;
        for _ in 0..1000 {
            q = q.add_scaled_vec(0.001, omega).normalize();
        }
        assert!(q.orientation_eq_threshold(Quat::from_rotation_z(1.0), 1e-4));
    }
}
