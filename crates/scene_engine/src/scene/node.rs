//! # Scene Node
//!
//! A [`Node`] holds a local position, rotation and scale and hands out the
//! matrix composed from them. The matrix is cached: every mutator marks the
//! cache dirty and the next [`Node::transform`] call recomputes it once.
//! Reading the transform only needs `&self`, so callers holding shared
//! references (renderers, propagation) still see an up-to-date matrix.
//!
//! ## Rotation convention
//!
//! Incremental rotations are multiplied on the right of the current rotation
//! (`rotation = rotation * delta`), so they turn about the node's own local
//! axes. Repeated increments slowly drift from unit length; call
//! [`Node::normalize_rotation`] when that matters.
//!
//! ## Hierarchy
//!
//! Parent/child links and the world transform are owned by the
//! [`NodeTree`](super::NodeTree) the node lives in and are read-only here.

use std::cell::Cell;

use super::transform::{compose, Transform};
use super::NodeId;
use crate::foundation::math::{Mat3x4, Mat4, Quat, Vec3};

/// Whether the cached local matrix matches the current TRS state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheState {
    Dirty,
    Clean,
}

/// Transformable scene object
#[derive(Debug, Clone)]
pub struct Node {
    local: Transform,
    cached: Cell<Mat4>,
    state: Cell<CacheState>,
    recomputations: Cell<u64>,
    world: Mat4,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Node at the origin with no rotation and unit scale
    #[must_use]
    pub fn new() -> Self {
        Self::from_transform(Transform::IDENTITY)
    }

    /// Node starting from the given local transform
    #[must_use]
    pub fn from_transform(local: Transform) -> Self {
        Self {
            local,
            cached: Cell::new(Mat4::IDENTITY),
            state: Cell::new(CacheState::Dirty),
            recomputations: Cell::new(0),
            world: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
        }
    }

    fn invalidate(&mut self) {
        self.state.set(CacheState::Dirty);
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    /// Local position
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.local.position
    }

    /// Local rotation
    #[must_use]
    pub const fn rotation(&self) -> Quat {
        self.local.rotation
    }

    /// Local per-axis scale
    #[must_use]
    pub const fn scale(&self) -> Vec3 {
        self.local.scale
    }

    /// All three local components
    #[must_use]
    pub const fn local(&self) -> &Transform {
        &self.local
    }

    /// Replace position, rotation and scale at once
    pub fn set_local(&mut self, local: Transform) {
        self.local = local;
        self.invalidate();
    }

    // ========================================================================
    // POSITION
    // ========================================================================

    /// Set the position
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.set_position_v(Vec3::new(x, y, z));
    }

    /// Set the position from a vector
    pub fn set_position_v(&mut self, position: Vec3) {
        self.local.position = position;
        self.invalidate();
    }

    /// Move along X
    pub fn translate_x(&mut self, dx: f32) {
        self.translate_v(Vec3::new(dx, 0.0, 0.0));
    }

    /// Move along Y
    pub fn translate_y(&mut self, dy: f32) {
        self.translate_v(Vec3::new(0.0, dy, 0.0));
    }

    /// Move along Z
    pub fn translate_z(&mut self, dz: f32) {
        self.translate_v(Vec3::new(0.0, 0.0, dz));
    }

    /// Move by an offset
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translate_v(Vec3::new(dx, dy, dz));
    }

    /// Move by an offset vector
    pub fn translate_v(&mut self, offset: Vec3) {
        self.local.position += offset;
        self.invalidate();
    }

    // ========================================================================
    // ROTATION
    // ========================================================================

    /// Replace the rotation
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.local.rotation = rotation;
        self.invalidate();
    }

    /// Turn by `angle` radians about `axis` in the node's local frame
    pub fn rotate_around_axis(&mut self, axis: Vec3, angle: f32) {
        self.local.rotation = self.local.rotation * Quat::from_axis_angle(axis, angle);
        self.invalidate();
    }

    /// Turn about local X
    pub fn rotate_x(&mut self, angle: f32) {
        self.rotate_around_axis(Vec3::X, angle);
    }

    /// Turn about local Y
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate_around_axis(Vec3::Y, angle);
    }

    /// Turn about local Z
    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate_around_axis(Vec3::Z, angle);
    }

    /// Restore the rotation to unit length
    pub fn normalize_rotation(&mut self) {
        self.local.rotation = self.local.rotation.normalize();
        self.invalidate();
    }

    // ========================================================================
    // SCALE
    // ========================================================================

    /// Set the scale
    pub fn set_scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.set_scale_v(Vec3::new(sx, sy, sz));
    }

    /// Set the scale from a vector
    pub fn set_scale_v(&mut self, scale: Vec3) {
        self.local.scale = scale;
        self.invalidate();
    }

    /// Multiply the X scale
    pub fn scale_x(&mut self, factor: f32) {
        self.scale_by_v(Vec3::new(factor, 1.0, 1.0));
    }

    /// Multiply the Y scale
    pub fn scale_y(&mut self, factor: f32) {
        self.scale_by_v(Vec3::new(1.0, factor, 1.0));
    }

    /// Multiply the Z scale
    pub fn scale_z(&mut self, factor: f32) {
        self.scale_by_v(Vec3::new(1.0, 1.0, factor));
    }

    /// Multiply each axis of the scale
    pub fn scale_by(&mut self, sx: f32, sy: f32, sz: f32) {
        self.scale_by_v(Vec3::new(sx, sy, sz));
    }

    /// Multiply the scale component-wise by a vector
    pub fn scale_by_v(&mut self, factors: Vec3) {
        self.local.scale = self.local.scale.component_mul(factors);
        self.invalidate();
    }

    // ========================================================================
    // CACHED LOCAL MATRIX
    // ========================================================================

    /// Local matrix `T * R * S`, recomputed only after a mutation
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        if self.state.get() == CacheState::Dirty {
            let m = compose(self.local.position, self.local.rotation, self.local.scale);
            self.cached.set(m);
            self.state.set(CacheState::Clean);
            self.recomputations.set(self.recomputations.get() + 1);
        }
        self.cached.get()
    }

    /// Local matrix in packed affine form
    #[must_use]
    pub fn to_affine(&self) -> Mat3x4 {
        self.transform().to_mat3x4()
    }

    /// True when the cached matrix reflects the current state
    #[must_use]
    pub fn is_transform_valid(&self) -> bool {
        self.state.get() == CacheState::Clean
    }

    /// How many times the local matrix has been recomputed
    #[must_use]
    pub fn transform_recomputations(&self) -> u64 {
        self.recomputations.get()
    }

    // ========================================================================
    // HIERARCHY VIEWS
    // ========================================================================

    /// World matrix written by the last propagation pass
    ///
    /// Identity until the node has been reached by a pass.
    #[must_use]
    pub const fn world_transform(&self) -> &Mat4 {
        &self.world
    }

    /// Map a point in this node's local space to world space
    #[must_use]
    pub fn local_to_world(&self, point: Vec3) -> Vec3 {
        self.world.transform_point(point)
    }

    /// Parent in the owning tree
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attachment order
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn set_world_transform(&mut self, world: Mat4) {
        self.world = world;
    }
}
