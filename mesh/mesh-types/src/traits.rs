//! Traits for surface types.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::Point3;

/// Read access to the points and faces of a triangulated surface.
///
/// Algorithms that only walk geometry take `impl MeshTopology` so they work
/// with any surface representation.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Whether the surface has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex by index, `None` if out of range.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Get a face's vertex indices, `None` if out of range.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Get a face with resolved vertex positions.
    ///
    /// Returns `None` if the face index or any of its vertex indices is out
    /// of range.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all vertices.
    fn vertices(&self) -> impl Iterator<Item = &Vertex>;

    /// Iterate over all faces as vertex index triples.
    fn faces(&self) -> impl Iterator<Item = [u32; 3]>;

    /// Iterate over all faces with resolved vertex positions.
    ///
    /// Faces referencing missing vertices are skipped.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Types that can report an axis-aligned bounding box.
pub trait MeshBounds {
    /// Bounding box of all vertices; empty when there are none.
    fn bounds(&self) -> Aabb;

    /// Bounding box, or `None` when empty.
    fn bounds_opt(&self) -> Option<Aabb> {
        let b = self.bounds();
        if b.is_empty() { None } else { Some(b) }
    }

    /// Centre of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
