//! Math kernel for 2D/3D transforms
//!
//! Hand-rolled, column-major `f32` types sized for graphics work:
//! - [`Vec2`], [`Vec3`], [`Vec4`]
//! - square matrices [`Mat2`], [`Mat3`], [`Mat4`]
//! - affine matrices [`Mat3x4`] and [`Mat2x3`] whose last row `[0 .. 0 1]` is implicit
//! - unit quaternions ([`Quat`]) and Euler [`RotationOrder`]s
//! - OpenGL-convention projection helpers in [`projection`]
//!
//! Element `(row, col)` of an `R`-row matrix lives at flat index `col * R + row`,
//! so the backing arrays can be handed to a GPU uniform buffer unchanged.
//!
//! None of the operations here fail. Degenerate inputs resolve to documented
//! fallbacks (the inverse of a singular matrix is the zero matrix, a zero
//! vector normalizes to itself, a zero quaternion normalizes to identity).

/// Implements `approx` traits for a kernel type exposing `to_array()`.
macro_rules! impl_approx_eq {
    ($ty:ty) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                self.to_array()
                    .iter()
                    .zip(other.to_array().iter())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                self.to_array()
                    .iter()
                    .zip(other.to_array().iter())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }
    };
}

mod affine;
mod interop;
mod matrix;
pub mod projection;
mod quaternion;
mod vector;

pub use affine::{Mat2x3, Mat3x4};
pub use matrix::{Mat2, Mat3, Mat4};
pub use projection::Viewport;
pub use quaternion::{Quat, RotationOrder};
pub use vector::{Vec2, Vec3, Vec4};

/// Default tolerance for approximate comparisons in this module
pub const EPSILON: f32 = 1e-6;

/// Determinants with a smaller magnitude are treated as zero when inverting
pub const SINGULAR_EPSILON: f32 = 1e-20;

/// Errors raised when untyped input has to be turned into kernel types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Rotation order name or index that does not denote one of the twelve orders
    #[error("Invalid rotation order: {0}")]
    InvalidRotationOrder(String),
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    #[must_use]
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    #[must_use]
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    #[must_use]
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    #[must_use]
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Absolute-difference comparison against [`super::EPSILON`]
    #[must_use]
    pub fn float_equal(a: f32, b: f32) -> bool {
        float_equal_threshold(a, b, super::EPSILON)
    }

    /// Absolute-difference comparison with a caller supplied tolerance
    ///
    /// Exactly equal values (including matching infinities) always compare equal.
    #[must_use]
    pub fn float_equal_threshold(a: f32, b: f32, epsilon: f32) -> bool {
        #[allow(clippy::float_cmp)]
        let identical = a == b;
        identical || (a - b).abs() <= epsilon
    }

    /// True when `value` is close enough to zero to count as singular
    #[must_use]
    pub fn is_singular(value: f32) -> bool {
        value.abs() < super::SINGULAR_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversions() {
        assert_relative_eq!(deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(rad_to_deg(constants::HALF_PI), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_float_equal_threshold() {
        assert!(float_equal(1.0, 1.0 + 1e-7));
        assert!(!float_equal(1.0, 1.001));
        assert!(float_equal_threshold(1.0, 1.001, 1e-2));
        assert!(float_equal(f32::INFINITY, f32::INFINITY));
    }

    #[test]
    fn test_is_singular() {
        assert!(is_singular(0.0));
        assert!(is_singular(-1e-25));
        assert!(!is_singular(1e-8));
    }

    #[test]
    fn test_clamp_and_lerp() {
        assert_relative_eq!(clamp(2.0, -1.0, 1.0), 1.0);
        assert_relative_eq!(clamp(-2.0, -1.0, 1.0), -1.0);
        assert_relative_eq!(lerp(0.0, 10.0, 0.25), 2.5);
    }
}
