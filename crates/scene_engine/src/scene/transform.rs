//! Translation/rotation/scale composition
//!
//! Every local transform in the scene is built by [`compose`]: scale first,
//! then rotation, then translation. Written as a matrix product that is
//! `T * R * S`, evaluated left to right starting from identity.

use crate::foundation::math::{Mat3, Mat3x4, Mat4, Quat, Vec3};

/// Compose a local matrix from position, rotation and per-axis scale
///
/// Callers that need to reproduce a node's cached matrix bit for bit must go
/// through this function.
#[must_use]
pub fn compose(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.set_col(3, position.extend(1.0));
    m *= rotation.to_mat4();
    m *= Mat4::from_scale(scale);
    m
}

/// Position, rotation and scale of an object relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in parent space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform with only position
    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a transform with position and rotation
    #[must_use]
    pub const fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Replace the position
    #[must_use]
    pub const fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Replace the rotation
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Same scale on every axis
    #[must_use]
    pub const fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    /// Convert to a transformation matrix
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        compose(self.position, self.rotation, self.scale)
    }

    /// Same composition in packed affine form
    #[must_use]
    pub fn to_affine(&self) -> Mat3x4 {
        self.to_matrix().to_mat3x4()
    }

    /// Apply this transform to a point
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.to_matrix().transform_point(point)
    }

    /// Apply this transform to a direction (translation ignored)
    #[must_use]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.to_matrix().transform_vector(vector)
    }

    /// Decompose a matrix built from translation, rotation and positive scale
    ///
    /// Shear and negative scale are not recovered. A zero-length basis column
    /// yields zero scale on that axis and an identity rotation.
    #[must_use]
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = matrix.col(3).truncate();

        let x_axis = matrix.col(0).truncate();
        let y_axis = matrix.col(1).truncate();
        let z_axis = matrix.col(2).truncate();
        let scale = Vec3::new(x_axis.length(), y_axis.length(), z_axis.length());

        if scale.x <= 0.0 || scale.y <= 0.0 || scale.z <= 0.0 {
            return Self {
                position,
                rotation: Quat::IDENTITY,
                scale,
            };
        }

        let rotation_matrix =
            Mat3::from_cols([x_axis / scale.x, y_axis / scale.y, z_axis / scale.z]);

        Self {
            position,
            rotation: Quat::from_mat3(&rotation_matrix),
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identity_composes_to_identity() {
        assert_eq!(Transform::IDENTITY.to_matrix(), Mat4::IDENTITY);
        assert_eq!(compose(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE), Mat4::IDENTITY);
    }

    #[test]
    fn test_compose_is_translate_rotate_scale() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let rotation = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 1.0), 0.6);
        let scale = Vec3::new(2.0, 0.5, 3.0);

        let expected =
            Mat4::from_translation(position) * rotation.to_mat4() * Mat4::from_scale(scale);
        assert_relative_eq!(compose(position, rotation, scale), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_applies_before_rotation_and_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_z(FRAC_PI_2))
            .with_uniform_scale(2.0);
        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (1,2,0)
        assert_relative_eq!(t.transform_point(Vec3::X), Vec3::new(1.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(t.transform_vector(Vec3::X), Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_affine_matches_full_matrix() {
        let t = Transform::from_position_rotation(Vec3::new(-3.0, 1.0, 0.5), Quat::from_rotation_x(1.0))
            .with_scale(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.to_affine().to_mat4(), t.to_matrix());
    }

    #[test]
    fn test_from_matrix_recovers_components() {
        let original = Transform::from_position(Vec3::new(4.0, -2.0, 7.0))
            .with_rotation(Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.9))
            .with_scale(Vec3::new(2.0, 3.0, 0.5));
        let recovered = Transform::from_matrix(&original.to_matrix());

        assert_relative_eq!(recovered.position, original.position, epsilon = EPSILON);
        assert_relative_eq!(recovered.scale, original.scale, epsilon = 1e-5);
        assert!(recovered.rotation.orientation_eq_threshold(original.rotation, 1e-5));
    }

    #[test]
    fn test_from_matrix_with_zero_scale() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let t = Transform::from_matrix(&m);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::new(1.0, 0.0, 1.0));
    }
}
