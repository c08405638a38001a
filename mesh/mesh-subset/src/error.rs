//! Error types for selection and compaction.

use mesh_octree::OctreeError;
use thiserror::Error;

/// Result type for subset operations.
pub type SubsetResult<T> = Result<T, SubsetError>;

/// Broad category of a [`SubsetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter or input surface is malformed.
    InvalidInput,
    /// A point, edge or face label does not exist in the surface.
    OutOfRange,
}

/// Errors that can occur while selecting or compacting faces.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubsetError {
    /// A point label is negative or not below the point count.
    #[error("point label {label} out of range (surface has {point_count} points)")]
    PointOutOfRange {
        /// The offending label.
        label: i64,
        /// Number of points in the surface.
        point_count: usize,
    },

    /// An edge label is negative or not below the edge count.
    #[error("edge label {label} out of range (surface has {edge_count} edges)")]
    EdgeOutOfRange {
        /// The offending label.
        label: i64,
        /// Number of edges in the surface.
        edge_count: usize,
    },

    /// A face label is negative or not below the face count.
    #[error("face label {label} out of range (surface has {face_count} faces)")]
    FaceOutOfRange {
        /// The offending label.
        label: i64,
        /// Number of faces in the surface.
        face_count: usize,
    },

    /// A face references a point that does not exist.
    #[error("face {face} references point {index} (surface has {point_count} points)")]
    InvalidFaceVertex {
        /// Index of the face.
        face: usize,
        /// The missing point index.
        index: u32,
        /// Number of points in the surface.
        point_count: usize,
    },

    /// The zone is neither empty nor a min/max pair.
    #[error("zone must be empty or exactly two points (min and max), got {count}")]
    InvalidZone {
        /// Number of points given.
        count: usize,
    },

    /// The selection mask does not have one entry per face.
    #[error("selection mask has {actual} entries but the surface has {expected} faces")]
    MaskLengthMismatch {
        /// Number of faces in the surface.
        expected: usize,
        /// Length of the mask.
        actual: usize,
    },

    /// No surface is known under the requested name.
    #[error("reference surface '{name}' not found")]
    ReferenceSurfaceNotFound {
        /// The requested name.
        name: String,
    },

    /// The reference surface could not be indexed.
    #[error("cannot index reference surface: {0}")]
    Octree(#[from] OctreeError),
}

impl SubsetError {
    /// Category of this error.
    ///
    /// ```
    /// use mesh_subset::{ErrorKind, SubsetError};
    ///
    /// let err = SubsetError::FaceOutOfRange { label: -1, face_count: 4 };
    /// assert_eq!(err.kind(), ErrorKind::OutOfRange);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PointOutOfRange { .. }
            | Self::EdgeOutOfRange { .. }
            | Self::FaceOutOfRange { .. }
            | Self::InvalidFaceVertex { .. } => ErrorKind::OutOfRange,
            Self::InvalidZone { .. }
            | Self::MaskLengthMismatch { .. }
            | Self::ReferenceSurfaceNotFound { .. }
            | Self::Octree(_) => ErrorKind::InvalidInput,
        }
    }
}
