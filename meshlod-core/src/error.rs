//! Error types for meshlod

use thiserror::Error;

/// Main error type for meshlod operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] InvalidMeshError),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Structural problems that make a mesh unusable for decimation.
///
/// These are always fatal to the call that detected them and are raised
/// before any output is built, so the input mesh is never touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMeshError {
    #[error("mesh has no `position` attribute")]
    MissingPosition,

    #[error("attribute `{attribute}` has {found} vertices, expected {expected}")]
    VertexCountMismatch {
        attribute: String,
        expected: usize,
        found: usize,
    },

    #[error("morph targets reference missing base attribute `{attribute}`")]
    OrphanMorphTarget { attribute: String },

    #[error("morph target {target} of `{attribute}` does not match the base item size or normalization")]
    MorphLayoutMismatch { attribute: String, target: usize },

    #[error("morph target {target} of `{attribute}` has {found} vertices, expected {expected}")]
    MorphVertexCountMismatch {
        attribute: String,
        target: usize,
        expected: usize,
        found: usize,
    },

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("item size must be between 1 and 4, got {item_size}")]
    InvalidItemSize { item_size: usize },

    #[error("{len} values cannot be split into items of size {item_size}")]
    RaggedValues { len: usize, item_size: usize },
}

/// Result type alias for meshlod operations
pub type Result<T> = std::result::Result<T, Error>;
