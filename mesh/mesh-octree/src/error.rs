//! Error types for octree construction.

use thiserror::Error;

/// Result type for octree operations.
pub type OctreeResult<T> = Result<T, OctreeError>;

/// Errors that can occur while building an octree.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OctreeError {
    /// No primitives were supplied.
    #[error("cannot build an octree over an empty primitive set")]
    EmptyPrimitiveSet,

    /// A configuration value is out of its valid range.
    #[error("invalid octree configuration: {details}")]
    InvalidConfig {
        /// What was wrong.
        details: String,
    },

    /// The supplied bounding volume does not contain a primitive.
    #[error("primitive {index} lies outside the supplied bounding volume")]
    PrimitiveOutsideBounds {
        /// Index of the offending primitive.
        index: usize,
    },
}
