//! # meshlod
//!
//! Attribute-aware vertex clustering and level-of-detail ladders for
//! indexed triangle meshes.
//!
//! This is the umbrella crate that provides convenient access to all meshlod
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Mesh data model (typed attribute buffers, indices, morph targets)
//! - **Simplification**: Vertex clustering decimation and the LOD pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use meshlod::prelude::*;
//!
//! // Two triangles sharing an edge, written without sharing vertices
//! let positions = vec![
//!     0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0,
//!     0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
//! ];
//! let mesh = Mesh::new().with_attribute(
//!     ATTRIBUTE_POSITION,
//!     AttributeBuffer::new(positions, 3, false).unwrap(),
//! );
//!
//! let welded = decimate(&mesh, 1e-4).unwrap();
//! assert_eq!(welded.vertex_count(), 4);
//!
//! let levels = DecimationPipeline::default()
//!     .run(&mesh, &mut NoopReporter)
//!     .unwrap();
//! assert_eq!(levels.len(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables simplification
//! - `simplification`: Decimation and LOD pipelines

// Re-export core functionality
pub use meshlod_core::*;

#[cfg(feature = "simplification")]
pub use meshlod_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use meshlod_core::*;

    #[cfg(feature = "simplification")]
    pub use meshlod_simplification::*;
}
