//! Summary statistics for reporting.

use std::fmt;

use hashbrown::HashSet;
use mesh_types::{Aabb, IndexedMesh, MeshBounds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size and extent of a surface.
///
/// # Example
///
/// ```
/// use mesh_subset::SurfaceStats;
/// use mesh_types::unit_cube;
///
/// let stats = SurfaceStats::of(&unit_cube());
/// assert_eq!((stats.points, stats.faces, stats.edges), (8, 12, 18));
/// println!("{stats}");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceStats {
    /// Number of points.
    pub points: usize,

    /// Number of faces.
    pub faces: usize,

    /// Number of distinct undirected edges.
    pub edges: usize,

    /// Bounding box of the points, `None` for a mesh without points.
    pub bounds: Option<Aabb>,
}

impl SurfaceStats {
    /// Gather statistics for `mesh`.
    #[must_use]
    pub fn of(mesh: &IndexedMesh) -> Self {
        let edges: HashSet<(u32, u32)> = mesh
            .faces
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();

        Self {
            points: mesh.vertices.len(),
            faces: mesh.faces.len(),
            edges: edges.len(),
            bounds: mesh.bounds_opt(),
        }
    }
}

impl fmt::Display for SurfaceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Points: {}  Faces: {}  Edges: {}  Bounding box: ",
            self.points, self.faces, self.edges
        )?;
        match &self.bounds {
            Some(aabb) => write!(
                f,
                "({}, {}, {}) ({}, {}, {})",
                aabb.min.x, aabb.min.y, aabb.min.z, aabb.max.x, aabb.max.y, aabb.max.z
            ),
            None => f.write_str("empty"),
        }
    }
}
