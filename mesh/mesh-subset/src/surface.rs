//! Validated surface with lazily built adjacency.

use crate::error::{SubsetError, SubsetResult};
use hashbrown::HashMap;
use mesh_types::{IndexedMesh, MeshTopology, Point3};
use std::sync::OnceLock;

/// Adjacency tables of a surface.
///
/// Edges are undirected and stored as `[lo, hi]` point pairs. They are
/// numbered in order of first appearance when walking faces in ascending
/// order and, within a face `[a, b, c]`, the edges `(a, b)`, `(b, c)`,
/// `(c, a)`. Every face list is ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceTopology {
    point_faces: Vec<Vec<usize>>,
    edges: Vec<[u32; 2]>,
    edge_faces: Vec<Vec<usize>>,
    face_edges: Vec<[usize; 3]>,
    face_faces: Vec<Vec<usize>>,
}

impl SurfaceTopology {
    /// Build adjacency for faces over `point_count` points.
    ///
    /// Every face index must be below `point_count`.
    fn build(faces: &[[u32; 3]], point_count: usize) -> Self {
        let mut point_faces: Vec<Vec<usize>> = vec![Vec::new(); point_count];
        let mut edge_ids: HashMap<(u32, u32), usize> = HashMap::new();
        let mut edges: Vec<[u32; 2]> = Vec::new();
        let mut edge_faces: Vec<Vec<usize>> = Vec::new();
        let mut face_edges: Vec<[usize; 3]> = Vec::with_capacity(faces.len());

        for (face_idx, face) in faces.iter().enumerate() {
            for &v in face {
                let incident = &mut point_faces[v as usize];
                // Degenerate faces repeat a point.
                if incident.last() != Some(&face_idx) {
                    incident.push(face_idx);
                }
            }

            let mut ids = [0_usize; 3];
            for (slot, (a, b)) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])]
                .into_iter()
                .enumerate()
            {
                let key = normalize_edge(a, b);
                let id = *edge_ids.entry(key).or_insert_with(|| {
                    edges.push([key.0, key.1]);
                    edge_faces.push(Vec::new());
                    edges.len() - 1
                });
                let incident = &mut edge_faces[id];
                if incident.last() != Some(&face_idx) {
                    incident.push(face_idx);
                }
                ids[slot] = id;
            }
            face_edges.push(ids);
        }

        let face_faces = face_edges
            .iter()
            .enumerate()
            .map(|(face_idx, ids)| {
                let mut neighbours: Vec<usize> = ids
                    .iter()
                    .flat_map(|&e| edge_faces[e].iter().copied())
                    .filter(|&other| other != face_idx)
                    .collect();
                neighbours.sort_unstable();
                neighbours.dedup();
                neighbours
            })
            .collect();

        Self {
            point_faces,
            edges,
            edge_faces,
            face_edges,
            face_faces,
        }
    }

    /// Faces incident to each point.
    #[must_use]
    pub fn point_faces(&self) -> &[Vec<usize>] {
        &self.point_faces
    }

    /// Undirected edges as `[lo, hi]` point pairs.
    #[must_use]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// Faces incident to each edge.
    #[must_use]
    pub fn edge_faces(&self) -> &[Vec<usize>] {
        &self.edge_faces
    }

    /// The three edges of each face, in `(a, b)`, `(b, c)`, `(c, a)` order.
    #[must_use]
    pub fn face_edges(&self) -> &[[usize; 3]] {
        &self.face_edges
    }

    /// Faces sharing at least one edge with each face, excluding itself.
    #[must_use]
    pub fn face_faces(&self) -> &[Vec<usize>] {
        &self.face_faces
    }

    /// Number of distinct edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Normalize an edge so the smaller index is first.
#[inline]
const fn normalize_edge(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// A triangulated surface whose faces are known to reference existing points.
///
/// Adjacency is computed on first use and cached; the surface itself is
/// immutable, so the cache never goes stale.
///
/// # Example
///
/// ```
/// use mesh_subset::Surface;
/// use mesh_types::unit_tetrahedron;
///
/// let surface = Surface::new(unit_tetrahedron()).unwrap();
/// assert_eq!(surface.edge_count(), 6);
/// assert_eq!(surface.topology().face_faces()[0], vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Surface {
    mesh: IndexedMesh,
    topology: OnceLock<SurfaceTopology>,
}

impl Surface {
    /// Wrap a mesh, checking every face index.
    ///
    /// # Errors
    ///
    /// Returns [`SubsetError::InvalidFaceVertex`] for the first face that
    /// references a missing point.
    pub fn new(mesh: IndexedMesh) -> SubsetResult<Self> {
        if let Some((face, index)) = mesh.first_invalid_face() {
            return Err(SubsetError::InvalidFaceVertex {
                face,
                index,
                point_count: mesh.vertex_count(),
            });
        }
        Ok(Self {
            mesh,
            topology: OnceLock::new(),
        })
    }

    /// The underlying mesh.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Unwrap into the underlying mesh.
    #[must_use]
    pub fn into_mesh(self) -> IndexedMesh {
        self.mesh
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Number of distinct edges. Builds adjacency if needed.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.topology().edge_count()
    }

    /// Adjacency tables, built on first call.
    #[must_use]
    pub fn topology(&self) -> &SurfaceTopology {
        self.topology
            .get_or_init(|| SurfaceTopology::build(&self.mesh.faces, self.mesh.vertex_count()))
    }

    /// Centroid of every face, in face order.
    #[must_use]
    pub fn face_centroids(&self) -> Vec<Point3<f64>> {
        self.mesh.triangles().map(|tri| tri.centroid()).collect()
    }
}

impl TryFrom<IndexedMesh> for Surface {
    type Error = SubsetError;

    fn try_from(mesh: IndexedMesh) -> SubsetResult<Self> {
        Self::new(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube, unit_tetrahedron};

    /// Two triangles sharing the edge 1-2.
    fn quad() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([1, 3, 2]);
        mesh
    }

    #[test]
    fn invalid_face_is_rejected() {
        let mut mesh = quad();
        mesh.faces.push([0, 1, 7]);
        let err = Surface::new(mesh).unwrap_err();
        assert!(matches!(
            err,
            SubsetError::InvalidFaceVertex {
                face: 2,
                index: 7,
                point_count: 4
            }
        ));
    }

    #[test]
    fn edges_in_first_appearance_order() {
        let surface = Surface::new(quad()).unwrap();
        let topo = surface.topology();
        assert_eq!(topo.edges(), &[[0, 1], [1, 2], [0, 2], [1, 3], [2, 3]]);
        assert_eq!(topo.face_edges(), &[[0, 1, 2], [3, 4, 1]]);
        assert_eq!(topo.edge_faces()[1], vec![0, 1]);
        assert_eq!(topo.edge_faces()[0], vec![0]);
    }

    #[test]
    fn point_faces_are_ascending() {
        let surface = Surface::new(quad()).unwrap();
        let topo = surface.topology();
        assert_eq!(topo.point_faces()[0], vec![0]);
        assert_eq!(topo.point_faces()[1], vec![0, 1]);
        assert_eq!(topo.point_faces()[2], vec![0, 1]);
        assert_eq!(topo.point_faces()[3], vec![1]);
    }

    #[test]
    fn face_faces_exclude_self() {
        let surface = Surface::new(quad()).unwrap();
        assert_eq!(surface.topology().face_faces(), &[vec![1], vec![0]]);
    }

    #[test]
    fn tetrahedron_counts() {
        let surface = Surface::new(unit_tetrahedron()).unwrap();
        assert_eq!(surface.point_count(), 4);
        assert_eq!(surface.face_count(), 4);
        assert_eq!(surface.edge_count(), 6);
        for (face, neighbours) in surface.topology().face_faces().iter().enumerate() {
            assert_eq!(neighbours.len(), 3, "face {face}");
            assert!(!neighbours.contains(&face));
        }
        assert_eq!(surface.topology().point_faces()[0], vec![0, 1, 2]);
    }

    #[test]
    fn cube_is_closed() {
        let surface = Surface::new(unit_cube()).unwrap();
        assert_eq!(surface.edge_count(), 18);
        assert!(surface.topology().edge_faces().iter().all(|f| f.len() == 2));
    }

    #[test]
    fn unused_points_have_no_faces() {
        let mut mesh = quad();
        mesh.vertices.push(Vertex::from_coords(5.0, 5.0, 5.0));
        let surface = Surface::new(mesh).unwrap();
        assert!(surface.topology().point_faces()[4].is_empty());
    }

    #[test]
    fn topology_is_cached() {
        let surface = Surface::new(quad()).unwrap();
        let first: *const SurfaceTopology = surface.topology();
        let second: *const SurfaceTopology = surface.topology();
        assert_eq!(first, second);
    }

    #[test]
    fn centroids_follow_face_order() {
        let surface = Surface::new(quad()).unwrap();
        let centroids = surface.face_centroids();
        assert_eq!(centroids.len(), 2);
        assert!((centroids[0].x - 1.0 / 3.0).abs() < 1e-12);
        assert!((centroids[1].x - 2.0 / 3.0).abs() < 1e-12);
    }
}
