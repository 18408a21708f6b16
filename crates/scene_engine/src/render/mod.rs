//! Rendering-side consumers of the scene layer
//!
//! Only the camera lives here: it turns world-space positions into window
//! coordinates and back. Draw submission is left to the application.

pub mod camera;

pub use camera::{Camera, Projection, Ray};
