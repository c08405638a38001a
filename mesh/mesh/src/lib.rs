//! Surface subsetting toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates that together cut a
//! triangulated surface down to a selected set of faces.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! let surface = Surface::new(mesh::types::unit_cube()).unwrap();
//!
//! // Keep the faces touching the top of the cube, then drop the rest.
//! let params = SubsetParams::default()
//!     .with_zone(Point3::new(-0.1, -0.1, 0.9), Point3::new(1.1, 1.1, 1.1));
//! let outcome = subset_surface(&surface, &params, &NoSurfaces, &SubsetConfig::default()).unwrap();
//!
//! assert_eq!(outcome.subset.face_map, vec![2, 3]);
//! assert_eq!(outcome.result.points, 4);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`
//! - [`octree`] - Octree index and inside/outside classification
//! - [`subset`] - Face selection criteria, compaction and statistics
//!
//! # Feature Flags
//!
//! - `serde` - Serialization of meshes, configuration, parameters and reports

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`.
pub use mesh_types as types;

/// Octree spatial index and point classification.
pub use mesh_octree as octree;

/// Face selection and compaction.
pub use mesh_subset as subset;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for surface subsetting.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Triangle, Vertex};

    // Classification
    pub use mesh_octree::{Octree, OctreeConfig, VolumeType};

    // Selection and compaction
    pub use mesh_subset::{
        NoSurfaces, ReferenceSurface, SelectionMask, SubsetConfig, SubsetParams, Surface,
        SurfaceResolver, compact, select_faces, subset_surface,
    };
}

// =============================================================================
// Tests
// =============================================================================
