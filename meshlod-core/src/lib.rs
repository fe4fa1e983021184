//! Core data structures for meshlod
//!
//! This crate provides the in-memory mesh description shared by every
//! meshlod crate: typed per-vertex attribute streams, index buffers,
//! morph targets, bounding boxes, and the error types used to reject
//! malformed meshes.

pub mod attribute;
pub mod mesh;
pub mod error;

pub use attribute::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
