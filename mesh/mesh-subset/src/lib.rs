//! Face selection and extraction for triangulated surfaces.
//!
//! Given a closed or open surface, this crate marks faces by a handful of
//! criteria and copies the marked faces, with only the points they use,
//! into a standalone mesh.
//!
//! # Overview
//!
//! - [`Surface`] - A mesh with validated face indices and cached adjacency
//! - [`SubsetParams`] - Which points, edges, faces, zone and reference
//!   surface select faces
//! - [`select_faces`] - Combines the criteria into a [`SelectionMask`]
//! - [`compact`] - Extracts the selected faces into a [`Subset`]
//! - [`subset_surface`] - Both steps, with before/after [`SurfaceStats`]
//!
//! # Criteria
//!
//! Criteria are combined with a logical OR, in this order:
//!
//! 1. Faces touching a listed point ([`faces_at_points`])
//! 2. Faces touching a listed edge ([`faces_at_edges`])
//! 3. Faces whose centroid lies in a closed box ([`faces_in_zone`])
//! 4. Faces whose centroid lies inside or outside another surface
//!    ([`faces_on_side`])
//! 5. Listed faces, optionally with their edge neighbours
//!    ([`faces_with_neighbours`])
//!
//! The union may then be inverted. Reference surfaces are looked up by name
//! through a [`SurfaceResolver`] and classified with a
//! [`mesh_octree::Octree`].
//!
//! # Quick Start
//!
//! ```
//! use mesh_subset::{subset_surface, ReferenceSurface, Surface, SubsetConfig, SubsetParams};
//! use mesh_types::{unit_cube, uv_sphere, IndexedMesh};
//! use std::collections::HashMap;
//!
//! let mut surfaces: HashMap<String, IndexedMesh> = HashMap::new();
//! surfaces.insert("box".to_string(), unit_cube());
//!
//! // Keep the part of a sphere that sticks out of the unit cube.
//! let surface = Surface::new(uv_sphere(0.8, 32, 16)).unwrap();
//! let params = SubsetParams::default().with_surface(ReferenceSurface::outside("box"));
//!
//! let outcome = subset_surface(&surface, &params, &surfaces, &SubsetConfig::default()).unwrap();
//! assert!(outcome.result.faces > 0);
//! assert!(outcome.result.faces < outcome.original.faces);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod compact;
mod config;
mod criteria;
mod error;
mod mask;
mod params;
mod pipeline;
mod resolver;
mod select;
mod stats;
mod surface;

pub use compact::{Subset, compact};
pub use config::SubsetConfig;
pub use criteria::{
    NeighbourSelection, faces_at_edges, faces_at_points, faces_in_zone, faces_on_side,
    faces_with_neighbours, reference_octree,
};
pub use error::{ErrorKind, SubsetError, SubsetResult};
pub use mask::SelectionMask;
pub use params::{ReferenceSurface, SubsetParams};
pub use pipeline::{SubsetOutcome, subset_surface};
pub use resolver::{NoSurfaces, SurfaceResolver};
pub use select::{Selection, SelectionReport, select_faces};
pub use stats::SurfaceStats;
pub use surface::{Surface, SurfaceTopology};
