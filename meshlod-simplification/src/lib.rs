//! Mesh decimation and level-of-detail generation
//!
//! This crate provides:
//! - Attribute-aware vertex clustering (spatial-hash welding)
//! - A pipeline that builds a ladder of decimation levels from one mesh
//! - Pass reporters for surfacing per-level statistics

pub mod clustering;
pub mod config;
pub mod pipeline;
pub mod report;

pub use clustering::*;
pub use config::*;
pub use pipeline::*;
pub use report::*;

use meshlod_core::{Mesh, Result};

/// Reduce a mesh by merging vertices that agree within a tolerance
pub trait MeshDecimator {
    /// Decimate `mesh` at `tolerance`, leaving the input untouched
    fn decimate(&self, mesh: &Mesh, tolerance: f64) -> Result<Mesh>;
}
