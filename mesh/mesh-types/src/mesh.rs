//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangulated surface.
///
/// Vertices and faces are stored separately; faces reference vertices by
/// position in `vertices`. The position of a face in `faces` is its identity,
/// which is what subset index maps refer to.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create an empty mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from flat coordinate and index arrays.
    ///
    /// Returns an empty mesh if either array length is not a multiple of 3.
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, MeshTopology};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();

        let faces = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Self { vertices, faces }
    }

    /// First face index that references a missing vertex, with the offending
    /// vertex index.
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Vertex};
    ///
    /// let mut mesh = IndexedMesh::new();
    /// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
    /// mesh.faces.push([0, 0, 3]);
    /// assert_eq!(mesh.first_invalid_face(), Some((0, 3)));
    /// ```
    #[must_use]
    pub fn first_invalid_face(&self) -> Option<(usize, u32)> {
        let vertex_count = self.vertices.len();
        self.faces.iter().enumerate().find_map(|(face_idx, face)| {
            face.iter()
                .find(|&&v| v as usize >= vertex_count)
                .map(|&v| (face_idx, v))
        })
    }

    /// Centroid of a face, `None` if the face or one of its vertices is missing.
    #[must_use]
    pub fn face_centroid(&self, face_index: usize) -> Option<nalgebra::Point3<f64>> {
        self.triangle(face_index).map(|tri| tri.centroid())
    }

    /// Reverse every face's winding.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
        for vertex in &mut self.vertices {
            if let Some(ref mut normal) = vertex.attributes.normal {
                *normal = -*normal;
            }
        }
    }

    /// Translate every vertex.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Scale uniformly about the origin.
    pub fn scale(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            vertex.position.coords *= factor;
        }
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle {
            v0: self.vertices.get(i0 as usize)?.position,
            v1: self.vertices.get(i1 as usize)?.position,
            v2: self.vertices.get(i2 as usize)?.position,
        })
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.faces.iter().copied()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Unit cube from (0,0,0) to (1,1,1), 12 outward-facing triangles.
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let positions = [
        0.0, 0.0, 0.0, // 0
        1.0, 0.0, 0.0, // 1
        1.0, 1.0, 0.0, // 2
        0.0, 1.0, 0.0, // 3
        0.0, 0.0, 1.0, // 4
        1.0, 0.0, 1.0, // 5
        1.0, 1.0, 1.0, // 6
        0.0, 1.0, 1.0, // 7
    ];
    let indices = [
        0, 2, 1, 0, 3, 2, // bottom (-Z)
        4, 5, 6, 4, 6, 7, // top (+Z)
        0, 1, 5, 0, 5, 4, // front (-Y)
        3, 7, 6, 3, 6, 2, // back (+Y)
        0, 4, 7, 0, 7, 3, // left (-X)
        1, 2, 6, 1, 6, 5, // right (+X)
    ];
    IndexedMesh::from_raw(&positions, &indices)
}

/// Tetrahedron on the unit axes, 4 outward-facing triangles.
///
/// Every face shares an edge with every other face.
///
/// ```
/// use mesh_types::{unit_tetrahedron, MeshTopology};
///
/// let tet = unit_tetrahedron();
/// assert_eq!(tet.vertex_count(), 4);
/// assert_eq!(tet.face_count(), 4);
/// ```
#[must_use]
pub fn unit_tetrahedron() -> IndexedMesh {
    let positions = [
        0.0, 0.0, 0.0, // 0
        1.0, 0.0, 0.0, // 1
        0.0, 1.0, 0.0, // 2
        0.0, 0.0, 1.0, // 3
    ];
    let indices = [
        0, 2, 1, // z = 0
        0, 1, 3, // y = 0
        0, 3, 2, // x = 0
        1, 2, 3, // slanted
    ];
    IndexedMesh::from_raw(&positions, &indices)
}

/// Latitude-longitude sphere centred on the origin with outward-facing
/// triangles.
///
/// Returns an empty mesh when `segments < 3` or `rings < 2`.
///
/// ```
/// use mesh_types::{uv_sphere, MeshTopology};
///
/// let sphere = uv_sphere(1.0, 8, 4);
/// assert_eq!(sphere.vertex_count(), 2 + 8 * 3);
/// assert_eq!(sphere.face_count(), 2 * 8 * 3);
/// ```
#[must_use]
pub fn uv_sphere(radius: f64, segments: u32, rings: u32) -> IndexedMesh {
    use std::f64::consts::PI;

    if segments < 3 || rings < 2 {
        return IndexedMesh::new();
    }

    let ring_count = (rings - 1) as usize;
    let mut mesh = IndexedMesh::with_capacity(
        2 + ring_count * segments as usize,
        2 * segments as usize * ring_count,
    );

    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, radius));
    for ring in 1..rings {
        let theta = PI * f64::from(ring) / f64::from(rings);
        for seg in 0..segments {
            let phi = 2.0 * PI * f64::from(seg) / f64::from(segments);
            mesh.vertices.push(Vertex::from_coords(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            ));
        }
    }
    let bottom = 1 + (rings - 1) * segments;
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, -radius));

    let at = |ring: u32, seg: u32| 1 + (ring - 1) * segments + seg % segments;

    for seg in 0..segments {
        mesh.faces.push([0, at(1, seg), at(1, seg + 1)]);
    }
    for ring in 1..rings - 1 {
        for seg in 0..segments {
            let a = at(ring, seg);
            let b = at(ring, seg + 1);
            let c = at(ring + 1, seg);
            let d = at(ring + 1, seg + 1);
            mesh.faces.push([a, c, d]);
            mesh.faces.push([a, d, b]);
        }
    }
    for seg in 0..segments {
        mesh.faces.push([bottom, at(rings - 1, seg + 1), at(rings - 1, seg)]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signed enclosed volume by the divergence theorem.
    fn signed_volume(mesh: &IndexedMesh) -> f64 {
        mesh.triangles()
            .map(|tri| tri.v0.coords.dot(&tri.v1.coords.cross(&tri.v2.coords)))
            .sum::<f64>()
            / 6.0
    }

    #[test]
    fn empty_mesh() {
        let mut mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        assert!(mesh.is_empty());
        assert!(mesh.bounds().contains(&nalgebra::Point3::origin()));
    }

    #[test]
    fn from_raw_rejects_ragged_input() {
        let mesh = IndexedMesh::from_raw(&[0.0, 1.0], &[0, 1, 2]);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn unit_cube_volume() {
        assert!((signed_volume(&unit_cube()) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn tetrahedron_volume() {
        let tet = unit_tetrahedron();
        assert!((signed_volume(&tet) - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn flipped_cube_has_negative_volume() {
        let mut cube = unit_cube();
        cube.flip_normals();
        assert!((signed_volume(&cube) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn invalid_faces_are_reported() {
        let mut mesh = unit_tetrahedron();
        assert_eq!(mesh.first_invalid_face(), None);
        mesh.faces.push([0, 1, 9]);
        assert_eq!(mesh.first_invalid_face(), Some((4, 9)));
        // Broken faces are skipped by the triangle iterator.
        assert_eq!(mesh.triangles().count(), 4);
        assert!(mesh.triangle(4).is_none());
    }

    #[test]
    fn face_centroid() {
        let tet = unit_tetrahedron();
        let c = tet.face_centroid(3).unwrap_or_else(nalgebra::Point3::origin);
        assert!((c.x - 1.0 / 3.0).abs() < 1e-12);
        assert!((c.y - 1.0 / 3.0).abs() < 1e-12);
        assert!((c.z - 1.0 / 3.0).abs() < 1e-12);
        assert!(tet.face_centroid(4).is_none());
    }

    #[test]
    fn sphere_is_closed_and_outward() {
        let sphere = uv_sphere(2.0, 16, 8);
        assert_eq!(sphere.face_count(), 2 * 16 * 7);
        assert_eq!(sphere.first_invalid_face(), None);
        let volume = signed_volume(&sphere);
        let exact = 4.0 / 3.0 * std::f64::consts::PI * 8.0;
        assert!(volume > 0.8 * exact && volume < exact);
    }

    #[test]
    fn sphere_rejects_too_few_segments() {
        assert!(uv_sphere(1.0, 2, 4).is_empty());
        assert!(uv_sphere(1.0, 8, 1).is_empty());
    }

    #[test]
    fn translate_and_scale() {
        let mut cube = unit_cube();
        cube.scale(2.0);
        cube.translate(Vector3::new(1.0, 0.0, 0.0));
        let b = cube.bounds();
        assert!((b.min.x - 1.0).abs() < f64::EPSILON);
        assert!((b.max.x - 3.0).abs() < f64::EPSILON);
        assert!((signed_volume(&cube) - 8.0).abs() < 1e-10);
    }
}
