//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - The column-major math kernel
//! - Logging utilities

pub mod logging;
pub mod math;
