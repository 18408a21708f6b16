//! Fixed-size float vectors

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

/// 2-component vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

/// 3-component vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

/// 4-component vector, typically a homogeneous point or direction
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vec4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

/// Operations shared by every vector width.
macro_rules! impl_vector {
    ($ty:ident, $n:literal, $($field:ident),+) => {
        impl $ty {
            /// All components zero
            pub const ZERO: Self = Self { $($field: 0.0),+ };

            /// All components one
            pub const ONE: Self = Self { $($field: 1.0),+ };

            /// Vector with every component set to `value`
            #[must_use]
            pub const fn splat(value: f32) -> Self {
                Self { $($field: value),+ }
            }

            /// Build from an array in component order
            #[must_use]
            pub const fn from_array(a: [f32; $n]) -> Self {
                let [$($field),+] = a;
                Self { $($field),+ }
            }

            /// Components in order
            #[must_use]
            pub const fn to_array(self) -> [f32; $n] {
                [$(self.$field),+]
            }

            /// Dot product
            #[must_use]
            pub fn dot(self, other: Self) -> f32 {
                0.0 $(+ self.$field * other.$field)+
            }

            /// Squared Euclidean length
            #[must_use]
            pub fn length_squared(self) -> f32 {
                self.dot(self)
            }

            /// Euclidean length
            #[must_use]
            pub fn length(self) -> f32 {
                self.length_squared().sqrt()
            }

            /// Unit-length copy; the zero vector is returned unchanged
            #[must_use]
            pub fn normalize(self) -> Self {
                let len = self.length();
                if len <= 0.0 {
                    return self;
                }
                self * (1.0 / len)
            }

            /// Linear interpolation, `t = 0` gives `self`
            #[must_use]
            pub fn lerp(self, other: Self, t: f32) -> Self {
                self + (other - self) * t
            }

            /// Component-wise product
            #[must_use]
            pub fn component_mul(self, other: Self) -> Self {
                Self { $($field: self.$field * other.$field),+ }
            }

            /// Component-wise absolute value
            #[must_use]
            pub fn abs(self) -> Self {
                Self { $($field: self.$field.abs()),+ }
            }

            /// Every component within `epsilon` of the other's
            #[must_use]
            pub fn equal_threshold(self, other: Self, epsilon: f32) -> bool {
                true $(&& super::utils::float_equal_threshold(self.$field, other.$field, epsilon))+
            }
        }

        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$ty> for f32 {
            type Output = $ty;
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl Div<f32> for $ty {
            type Output = Self;
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $ty {
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl From<[f32; $n]> for $ty {
            fn from(a: [f32; $n]) -> Self {
                Self::from_array(a)
            }
        }

        impl From<$ty> for [f32; $n] {
            fn from(v: $ty) -> Self {
                v.to_array()
            }
        }

        impl_approx_eq!($ty);
    };
}

impl_vector!(Vec2, 2, x, y);
impl_vector!(Vec3, 3, x, y, z);
impl_vector!(Vec4, 4, x, y, z, w);

/// Indexing by component position, panicking past the last component like a slice.
macro_rules! impl_vector_index {
    ($ty:ident, $($i:literal => $field:ident),+) => {
        impl Index<usize> for $ty {
            type Output = f32;
            fn index(&self, index: usize) -> &f32 {
                match index {
                    $($i => &self.$field,)+
                    _ => panic!("{} index out of range: {index}", stringify!($ty)),
                }
            }
        }

        impl IndexMut<usize> for $ty {
            fn index_mut(&mut self, index: usize) -> &mut f32 {
                match index {
                    $($i => &mut self.$field,)+
                    _ => panic!("{} index out of range: {index}", stringify!($ty)),
                }
            }
        }
    };
}

impl_vector_index!(Vec2, 0 => x, 1 => y);
impl_vector_index!(Vec3, 0 => x, 1 => y, 2 => z);
impl_vector_index!(Vec4, 0 => x, 1 => y, 2 => z, 3 => w);

impl Vec2 {
    /// Unit X axis
    pub const X: Self = Self::new(1.0, 0.0);
    /// Unit Y axis
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Create a new vector
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Append a third component
    #[must_use]
    pub const fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

impl Vec3 {
    /// Unit X axis
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit Y axis
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit Z axis
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new vector
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Right-handed cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Append a fourth component
    #[must_use]
    pub const fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Drop the Z component
    #[must_use]
    pub const fn truncate(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Vec4 {
    /// Create a new vector
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Drop the W component
    #[must_use]
    pub const fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross_is_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert_relative_eq!(v, Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-6);
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_arithmetic_and_indexing() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        v += Vec4::ONE;
        v *= 2.0;
        assert_eq!(v, Vec4::new(4.0, 6.0, 8.0, 10.0));
        assert_relative_eq!(v[3], 10.0);
        v[0] = -1.0;
        assert_eq!(-v, Vec4::new(1.0, -6.0, -8.0, -10.0));
        assert_eq!(2.0 * Vec2::new(1.0, 2.0), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_lerp_and_dot() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, -10.0, 2.0);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(5.0, -5.0, 1.0));
        assert_relative_eq!(b.dot(Vec3::ONE), 2.0);
    }

    #[test]
    fn test_widen_and_narrow() {
        let v = Vec2::new(1.0, 2.0).extend(3.0).extend(1.0);
        assert_eq!(v, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(v.truncate().truncate(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_bytemuck_layout() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0]);
    }
}
