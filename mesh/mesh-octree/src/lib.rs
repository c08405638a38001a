//! Octree spatial index with inside/outside classification.
//!
//! This crate indexes a set of geometric primitives (normally the triangles
//! of a closed surface) in an octree and answers one question quickly: is a
//! point inside the surface, outside it, or on it?
//!
//! - [`Octree`] - The index, generic over any [`Primitive`]
//! - [`OctreeConfig`] - Depth, leaf capacity, duplicity budget and jitter seed
//! - [`VolumeType`] - Classification result
//!
//! # Construction
//!
//! The bounding volume is jittered with a seeded random generator so that
//! split planes do not pass exactly through mesh vertices, then leaves are
//! refined level by level. A primitive that straddles a split plane is
//! registered in every child it touches; the total number of registrations
//! is capped by `duplicity * primitive_count`.
//!
//! # Classification
//!
//! Rays are cast from the query point along fixed oblique directions and the
//! crossings are counted with sign. A nonzero count means inside, so both
//! outward- and inward-oriented closed surfaces enclose their interior.
//! Points within the tolerance of a primitive, or points for which every
//! probe grazes an edge, are reported as [`VolumeType::Mixed`].
//!
//! # Example
//!
//! ```
//! use mesh_octree::{Octree, OctreeConfig, VolumeType};
//! use mesh_types::{uv_sphere, Point3};
//!
//! let sphere = uv_sphere(1.0, 16, 8);
//! let tree = Octree::from_mesh(&sphere, &OctreeConfig::default()).unwrap();
//!
//! assert_eq!(tree.classify(&Point3::new(0.1, 0.2, 0.0)), VolumeType::Inside);
//! assert_eq!(tree.classify(&Point3::new(3.0, 0.0, 0.0)), VolumeType::Outside);
//! assert!(tree.entry_count() <= 3 * tree.primitive_count());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod octree;
mod primitive;
mod volume;

pub use config::OctreeConfig;
pub use error::{OctreeError, OctreeResult};
pub use octree::Octree;
pub use primitive::{Primitive, RayCrossing, triangle_overlaps_box};
pub use volume::VolumeType;
