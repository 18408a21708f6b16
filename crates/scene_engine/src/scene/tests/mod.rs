//! Integration tests for the scene layer
//!
//! These exercise nodes, the tree and the render list together rather than
//! one type at a time.
