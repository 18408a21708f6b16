//! # 3D Camera
//!
//! A [`Camera`] combines an eye position and orientation with a
//! [`Projection`] and produces the matrices a renderer needs, plus the
//! window-space mapping used for picking.
//!
//! ## Conventions
//! - Right-handed, Y-up world space; the camera looks down its local `-Z`.
//! - Clip-space depth in `[-1, 1]`, window depth in `[0, 1]`.
//! - Window coordinates have their origin at the viewport's bottom-left.
//!
//! Matrices are computed on demand. Cameras are cheap to clone and carry no
//! cached state.

use crate::config::CameraConfig;
use crate::foundation::math::projection::{self, Viewport};
use crate::foundation::math::utils::{self, is_singular};
use crate::foundation::math::{Mat4, Vec3};

/// Lens model used to build the projection matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Pinhole camera with a symmetric frustum
    Perspective {
        /// Vertical field of view in radians
        fov_y: f32,
        /// Width over height
        aspect: f32,
        /// Near clip distance
        near: f32,
        /// Far clip distance
        far: f32,
    },

    /// Parallel projection of an axis-aligned box in eye space
    Orthographic {
        /// Left clip plane
        left: f32,
        /// Right clip plane
        right: f32,
        /// Bottom clip plane
        bottom: f32,
        /// Top clip plane
        top: f32,
        /// Near clip distance
        near: f32,
        /// Far clip distance
        far: f32,
    },
}

impl Projection {
    /// Projection matrix for this lens
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => projection::perspective(fov_y, aspect, near, far),
            Self::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => projection::ortho(left, right, bottom, top, near, far),
        }
    }
}

/// Half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at distance `t` along the ray
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// 3D camera for perspective and orthographic projections
///
/// Holds a position, a look-at target, an up vector and a [`Projection`].
/// The view matrix is rebuilt from the first three on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically `+Y`)
    pub up: Vec3,

    /// Lens parameters
    pub projection: Projection,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// # Example
    /// ```rust
    /// use scene_engine::foundation::math::Vec3;
    /// use scene_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(
    ///     Vec3::new(0.0, 2.0, 5.0),
    ///     75.0,
    ///     16.0 / 9.0,
    ///     0.1,
    ///     100.0,
    /// );
    /// assert_eq!(camera.target, Vec3::ZERO);
    /// ```
    #[must_use]
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Perspective {
                fov_y: utils::deg_to_rad(fov_degrees),
                aspect,
                near,
                far,
            },
        }
    }

    /// Create an orthographic camera looking at the origin
    ///
    /// The clip box is given in eye space: `left..right` by `bottom..top`,
    /// from `near` to `far` in front of the camera.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn orthographic(
        position: Vec3,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            },
        }
    }

    /// Perspective camera described by a config section
    ///
    /// The config is taken as is; call [`CameraConfig::validate`] first when
    /// it comes from user input.
    #[must_use]
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::perspective(
            config.position(),
            config.fov_degrees,
            config.aspect,
            config.near,
            config.far,
        );
        camera.look_at(config.target(), config.up());
        camera
    }

    /// Update camera position in world space
    ///
    /// Target and orientation are kept.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update the look-at point without moving the camera
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Set the target point and up vector together
    ///
    /// The up vector need not be perpendicular to the view direction; the
    /// view matrix orthonormalizes the basis.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Update the aspect ratio after a viewport change
    ///
    /// Only perspective cameras have an aspect ratio; orthographic cameras
    /// are left unchanged. Changes larger than 0.01 are logged.
    pub fn set_aspect_ratio(&mut self, new_aspect: f32) {
        if let Projection::Perspective { aspect, .. } = &mut self.projection {
            if (*aspect - new_aspect).abs() > 0.01 {
                log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", *aspect, new_aspect);
            }
            *aspect = new_aspect;
        }
    }

    /// World-to-eye transform
    ///
    /// Translates the world by `-position`, then rotates so the view
    /// direction becomes `-Z` and `up` lies in the `YZ` plane.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        projection::look_at(self.position, self.target, self.up)
    }

    /// Eye-to-clip transform for the current [`Projection`]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Combined `projection * view`
    ///
    /// For an object, multiply on the right by its world matrix:
    /// `clip = view_projection * world * vertex`.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Window coordinates of a point in an object's local space
    ///
    /// `model` is the object's world matrix; pass [`Mat4::IDENTITY`] for a
    /// point already in world space.
    #[must_use]
    pub fn project(&self, point: Vec3, model: &Mat4, viewport: &Viewport) -> Vec3 {
        let modelview = self.view_matrix() * *model;
        projection::project(point, &modelview, &self.projection_matrix(), viewport)
    }

    /// Object-space point under a window coordinate
    ///
    /// `window.z` is depth in `[0, 1]`: 0 on the near plane, 1 on the far
    /// plane. Returns [`Vec3::ZERO`] if the combined matrix cannot be
    /// inverted (for example a zero-scale model).
    #[must_use]
    pub fn unproject(&self, window: Vec3, model: &Mat4, viewport: &Viewport) -> Vec3 {
        let modelview = self.view_matrix() * *model;
        let projection = self.projection_matrix();
        if is_singular((projection * modelview).determinant()) {
            log::warn!("Cannot unproject {:?}: camera matrices are singular", window);
            return Vec3::ZERO;
        }
        projection::unproject(window, &modelview, &projection, viewport)
    }

    /// World-space picking ray through a window pixel
    ///
    /// The ray runs from the near plane toward the far plane. Perspective
    /// rays start at the camera position; orthographic rays start on the
    /// near plane since they share a direction.
    ///
    /// # Example
    /// ```rust
    /// use scene_engine::foundation::math::{Vec3, Viewport};
    /// use scene_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 60.0, 1.0, 0.1, 100.0);
    /// let viewport = Viewport::new(0, 0, 600, 600);
    /// let ray = camera.screen_to_world_ray(300.0, 300.0, &viewport);
    /// assert!((ray.direction.z + 1.0).abs() < 1e-4);
    /// ```
    #[must_use]
    pub fn screen_to_world_ray(&self, window_x: f32, window_y: f32, viewport: &Viewport) -> Ray {
        let near = self.unproject(Vec3::new(window_x, window_y, 0.0), &Mat4::IDENTITY, viewport);
        let far = self.unproject(Vec3::new(window_x, window_y, 1.0), &Mat4::IDENTITY, viewport);

        let origin = match self.projection {
            Projection::Perspective { .. } => self.position,
            Projection::Orthographic { .. } => near,
        };
        Ray::new(origin, far - near)
    }
}

impl Default for Camera {
    /// Perspective camera above and behind the origin, looking at it
    ///
    /// - Position: (0, 3, 3)
    /// - Target: (0, 0, 0)
    /// - Up: (0, 1, 0)
    /// - FOV: 45 degrees
    /// - Aspect: 16:9
    /// - Near: 0.1, Far: 1000.0
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
