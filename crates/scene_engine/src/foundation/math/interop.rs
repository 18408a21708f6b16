//! Conversions between kernel types and `nalgebra`
//!
//! Both sides store matrices column-major, so conversions are plain copies.

use nalgebra as na;

use super::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

impl From<Vec2> for na::Vector2<f32> {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<na::Vector2<f32>> for Vec2 {
    fn from(v: na::Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vec3> for na::Vector3<f32> {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<na::Vector3<f32>> for Vec3 {
    fn from(v: na::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for na::Point3<f32> {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec4> for na::Vector4<f32> {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<na::Vector4<f32>> for Vec4 {
    fn from(v: na::Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Quat> for na::Quaternion<f32> {
    fn from(q: Quat) -> Self {
        Self::new(q.w, q.v.x, q.v.y, q.v.z)
    }
}

impl From<na::Quaternion<f32>> for Quat {
    fn from(q: na::Quaternion<f32>) -> Self {
        Self::new(q.w, Vec3::new(q.i, q.j, q.k))
    }
}

impl From<na::UnitQuaternion<f32>> for Quat {
    fn from(q: na::UnitQuaternion<f32>) -> Self {
        Self::from(q.into_inner())
    }
}

impl From<Mat3> for na::Matrix3<f32> {
    fn from(m: Mat3) -> Self {
        Self::from_column_slice(m.as_slice())
    }
}

impl From<na::Matrix3<f32>> for Mat3 {
    fn from(m: na::Matrix3<f32>) -> Self {
        let mut cols = [0.0; 9];
        cols.copy_from_slice(m.as_slice());
        Self::from_cols_array(cols)
    }
}

impl From<Mat4> for na::Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        Self::from_column_slice(m.as_slice())
    }
}

impl From<na::Matrix4<f32>> for Mat4 {
    fn from(m: na::Matrix4<f32>) -> Self {
        let mut cols = [0.0; 16];
        cols.copy_from_slice(m.as_slice());
        Self::from_cols_array(cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_layout_agrees() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let n: na::Matrix4<f32> = m.into();
        assert_relative_eq!(n[(0, 3)], 1.0);
        assert_relative_eq!(n[(2, 3)], 3.0);
        assert_eq!(Mat4::from(n), m);
    }

    #[test]
    fn test_quaternion_component_order() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 1.0), 0.5);
        let n: na::Quaternion<f32> = q.into();
        assert_relative_eq!(n.w, q.w);
        assert_relative_eq!(n.j, q.v.y);
        assert_eq!(Quat::from(n), q);
    }

    #[test]
    fn test_rotation_matrix_agrees() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, -1.0, 2.0), 0.75);
        let unit = na::UnitQuaternion::from_quaternion(na::Quaternion::<f32>::from(q));
        let theirs = Mat3::from(unit.to_rotation_matrix().into_inner());
        assert_relative_eq!(q.to_mat3(), theirs, epsilon = 1e-5);
        assert_relative_eq!(Quat::from(unit), q, epsilon = 1e-5);
    }
}
