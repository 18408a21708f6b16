//! # Scene Engine
//!
//! The spatial-transform core of a real-time 3D scene: a column-major math
//! kernel, nodes with cached local transforms, parent/child world-transform
//! propagation and camera projection.
//!
//! ## Features
//!
//! - **Math kernel**: `Vec2`-`Vec4`, square and affine matrices, quaternions
//!   with all twelve Euler orders, OpenGL-style projection helpers
//! - **Cached nodes**: local `T * R * S` matrices rebuilt only after a change
//! - **Hierarchy**: arena-backed tree with cycle-checked attach and an
//!   iterative pre-order propagation pass
//! - **Camera**: perspective/orthographic projection, window projection,
//!   unprojection and picking rays
//! - **Configuration**: TOML or RON scene settings via serde
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut tree = NodeTree::new();
//! let body = tree.create();
//! let arm = tree.create();
//! tree.add_child(body, arm).unwrap();
//!
//! tree[body].translate_x(-250.0);
//! tree[arm].rotate_y(0.5);
//!
//! let mut graph = SceneGraph::new();
//! graph.add_child(body);
//! graph.update_world_transforms(&mut tree);
//!
//! let camera = Camera::perspective(Vec3::new(0.0, 0.0, 600.0), 70.0, 4.0 / 3.0, 1.0, 1000.0);
//! let viewport = Viewport::new(0, 0, 800, 600);
//! let window = camera.project(Vec3::ZERO, tree[arm].world_transform(), &viewport);
//! assert!(window.x < 400.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::many_single_char_names
)]

pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CameraConfig, Config, ConfigError, EngineConfig, SceneConfig, ViewportConfig},
        foundation::math::{
            Mat2, Mat2x3, Mat3, Mat3x4, Mat4, Quat, RotationOrder, Vec2, Vec3, Vec4, Viewport,
        },
        render::{Camera, Projection, Ray},
        scene::{
            compose, walk, Node, NodeId, NodeTree, RenderList, SceneError, SceneGraph, Spatial,
            Transform,
        },
    };
}
