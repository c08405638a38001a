//! Individual selection criteria.
//!
//! Each criterion is a pure function of the surface and its parameters that
//! returns the faces it selects, ascending and without duplicates. The
//! [`select_faces`](crate::select_faces) engine combines them.

use crate::error::{SubsetError, SubsetResult};
use crate::mask::SelectionMask;
use crate::params::checked_index;
use crate::surface::Surface;
use mesh_octree::{Octree, OctreeConfig, VolumeType};
use mesh_types::{Aabb, IndexedMesh, Point3, Triangle};
use rayon::prelude::*;

/// Faces selected by [`faces_with_neighbours`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NeighbourSelection {
    /// Listed faces plus any neighbours added, ascending.
    pub faces: Vec<usize>,

    /// Neighbours that were not selected before they were reached.
    pub added: usize,
}

fn sorted_unique(faces: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut faces: Vec<usize> = faces.into_iter().collect();
    faces.sort_unstable();
    faces.dedup();
    faces
}

/// Faces incident to any of the given points.
///
/// # Errors
///
/// Returns [`SubsetError::PointOutOfRange`] for a negative label or one not
/// below the point count.
///
/// # Example
///
/// ```
/// use mesh_subset::{Surface, faces_at_points};
/// use mesh_types::unit_tetrahedron;
///
/// let surface = Surface::new(unit_tetrahedron()).unwrap();
/// assert_eq!(faces_at_points(&surface, &[3]).unwrap(), vec![1, 2, 3]);
/// ```
pub fn faces_at_points(surface: &Surface, points: &[i64]) -> SubsetResult<Vec<usize>> {
    let point_count = surface.point_count();
    let point_faces = surface.topology().point_faces();

    let mut selected = Vec::new();
    for &label in points {
        let point = checked_index(label, point_count)
            .ok_or(SubsetError::PointOutOfRange { label, point_count })?;
        selected.extend_from_slice(&point_faces[point]);
    }
    Ok(sorted_unique(selected))
}

/// Faces incident to any of the given edges.
///
/// Edge labels follow the numbering of
/// [`SurfaceTopology::edges`](crate::SurfaceTopology::edges).
///
/// # Errors
///
/// Returns [`SubsetError::EdgeOutOfRange`] for a negative label or one not
/// below the edge count.
pub fn faces_at_edges(surface: &Surface, edges: &[i64]) -> SubsetResult<Vec<usize>> {
    if edges.is_empty() {
        return Ok(Vec::new());
    }

    let topology = surface.topology();
    let edge_count = topology.edge_count();

    let mut selected = Vec::new();
    for &label in edges {
        let edge = checked_index(label, edge_count)
            .ok_or(SubsetError::EdgeOutOfRange { label, edge_count })?;
        selected.extend_from_slice(&topology.edge_faces()[edge]);
    }
    Ok(sorted_unique(selected))
}

/// Faces whose centroid lies in the closed box `[zone[0], zone[1]]`.
///
/// An empty zone selects nothing, as does a zone whose minimum exceeds its
/// maximum on some axis.
///
/// # Errors
///
/// Returns [`SubsetError::InvalidZone`] unless the zone has 0 or 2 points.
///
/// # Example
///
/// ```
/// use mesh_subset::{Surface, faces_in_zone};
/// use mesh_types::{unit_cube, Point3};
///
/// let surface = Surface::new(unit_cube()).unwrap();
/// // The bottom face of the cube.
/// let zone = [Point3::new(-1.0, -1.0, -0.1), Point3::new(2.0, 2.0, 0.1)];
/// assert_eq!(faces_in_zone(&surface, &zone).unwrap(), vec![0, 1]);
/// ```
pub fn faces_in_zone(surface: &Surface, zone: &[Point3<f64>]) -> SubsetResult<Vec<usize>> {
    let (min, max) = match zone {
        [] => return Ok(Vec::new()),
        [min, max] => (*min, *max),
        _ => return Err(SubsetError::InvalidZone { count: zone.len() }),
    };
    // Not `Aabb::new`: an inverted zone must stay inverted and match nothing.
    let aabb = Aabb { min, max };

    Ok(surface
        .face_centroids()
        .iter()
        .enumerate()
        .filter_map(|(face, centroid)| aabb.contains(centroid).then_some(face))
        .collect())
}

/// Octree over a reference surface's triangles, bounded by its own extents.
///
/// # Errors
///
/// - [`SubsetError::InvalidFaceVertex`] if a face of the surface names a
///   missing vertex.
/// - [`SubsetError::Octree`] if the surface has no faces or `config` is
///   invalid.
pub fn reference_octree(
    reference: &IndexedMesh,
    config: &OctreeConfig,
) -> SubsetResult<Octree<Triangle>> {
    if let Some((face, index)) = reference.first_invalid_face() {
        return Err(SubsetError::InvalidFaceVertex {
            face,
            index,
            point_count: reference.vertices.len(),
        });
    }
    Ok(Octree::from_mesh(reference, config)?)
}

/// Unselected faces whose centroid lies outside (`outside == true`) or
/// inside the surface indexed by `tree`.
///
/// Faces already selected in `mask` are skipped and never classified.
/// Centroids on the reference surface classify as
/// [`VolumeType::Mixed`] and are never selected. With `parallel` the
/// centroids are classified on the rayon pool; the result is the same.
#[must_use]
pub fn faces_on_side(
    surface: &Surface,
    tree: &Octree<Triangle>,
    outside: bool,
    mask: &SelectionMask,
    parallel: bool,
) -> Vec<usize> {
    let wanted = if outside {
        VolumeType::Outside
    } else {
        VolumeType::Inside
    };
    let centroids = surface.face_centroids();
    let on_side =
        |face: usize| !mask.is_marked(face) && tree.classify(&centroids[face]) == wanted;

    if parallel {
        (0..centroids.len())
            .into_par_iter()
            .filter(|&face| on_side(face))
            .collect()
    } else {
        (0..centroids.len()).filter(|&face| on_side(face)).collect()
    }
}

/// The listed faces and, with `add_neighbours`, every face sharing an edge
/// with one of them.
///
/// Listed faces are processed in order. A neighbour counts towards
/// [`NeighbourSelection::added`] when it was neither selected in `mask` nor
/// reached earlier in this call.
///
/// # Errors
///
/// Returns [`SubsetError::FaceOutOfRange`] for a negative label or one not
/// below the face count.
///
/// # Example
///
/// ```
/// use mesh_subset::{Surface, SelectionMask, faces_with_neighbours};
/// use mesh_types::unit_tetrahedron;
///
/// let surface = Surface::new(unit_tetrahedron()).unwrap();
/// let mask = SelectionMask::new(surface.face_count());
///
/// let picked = faces_with_neighbours(&surface, &[0], true, &mask).unwrap();
/// assert_eq!(picked.faces, vec![0, 1, 2, 3]);
/// assert_eq!(picked.added, 3);
/// ```
pub fn faces_with_neighbours(
    surface: &Surface,
    faces: &[i64],
    add_neighbours: bool,
    mask: &SelectionMask,
) -> SubsetResult<NeighbourSelection> {
    let face_count = surface.face_count();

    let mut reached = SelectionMask::new(face_count);
    reached.mark_all(mask.selected());

    let mut selected = Vec::new();
    let mut added = 0;

    for &label in faces {
        let face = checked_index(label, face_count)
            .ok_or(SubsetError::FaceOutOfRange { label, face_count })?;
        reached.mark(face);
        selected.push(face);

        if add_neighbours {
            for &neighbour in &surface.topology().face_faces()[face] {
                if reached.mark(neighbour) {
                    added += 1;
                    selected.push(neighbour);
                }
            }
        }
    }

    Ok(NeighbourSelection {
        faces: sorted_unique(selected),
        added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, unit_tetrahedron};

    fn tetrahedron() -> Surface {
        Surface::new(unit_tetrahedron()).unwrap()
    }

    #[test]
    fn point_zero_of_tetrahedron() {
        let faces = faces_at_points(&tetrahedron(), &[0]).unwrap();
        assert_eq!(faces, vec![0, 1, 2]);
    }

    #[test]
    fn repeated_points_are_merged() {
        let faces = faces_at_points(&tetrahedron(), &[1, 1, 2]).unwrap();
        assert_eq!(faces, vec![0, 1, 2, 3]);
    }

    #[test]
    fn point_out_of_range() {
        let err = faces_at_points(&tetrahedron(), &[4]).unwrap_err();
        assert!(matches!(err, SubsetError::PointOutOfRange { label: 4, .. }));
    }

    #[test]
    fn edge_faces() {
        let surface = tetrahedron();
        // Edge 0 is (0, 2), shared by faces 0 and 2.
        assert_eq!(surface.topology().edges()[0], [0, 2]);
        assert_eq!(faces_at_edges(&surface, &[0]).unwrap(), vec![0, 2]);
        assert!(faces_at_edges(&surface, &[]).unwrap().is_empty());
    }

    #[test]
    fn edge_out_of_range() {
        let err = faces_at_edges(&tetrahedron(), &[-2]).unwrap_err();
        assert!(matches!(
            err,
            SubsetError::EdgeOutOfRange {
                label: -2,
                edge_count: 6
            }
        ));
    }

    #[test]
    fn zone_without_centroids_selects_nothing() {
        let zone = [Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0)];
        assert!(faces_in_zone(&tetrahedron(), &zone).unwrap().is_empty());
    }

    #[test]
    fn inverted_zone_selects_nothing() {
        let zone = [Point3::new(2.0, 2.0, 2.0), Point3::new(-2.0, -2.0, -2.0)];
        assert!(faces_in_zone(&tetrahedron(), &zone).unwrap().is_empty());
    }

    #[test]
    fn zone_is_closed() {
        let surface = Surface::new(unit_cube()).unwrap();
        // Top-face centroids sit at z = 1 exactly.
        let zone = [Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 1.0, 1.0)];
        assert_eq!(faces_in_zone(&surface, &zone).unwrap(), vec![2, 3]);
    }

    #[test]
    fn zone_of_one_point_is_invalid() {
        let err = faces_in_zone(&tetrahedron(), &[Point3::origin()]).unwrap_err();
        assert!(matches!(err, SubsetError::InvalidZone { count: 1 }));
    }

    #[test]
    fn neighbours_count_only_new_faces() {
        let surface = tetrahedron();
        let mut mask = SelectionMask::new(4);
        mask.mark(1);

        let picked = faces_with_neighbours(&surface, &[0], true, &mask).unwrap();
        assert_eq!(picked.faces, vec![0, 2, 3]);
        assert_eq!(picked.added, 2);
    }

    #[test]
    fn neighbours_reached_earlier_are_not_recounted() {
        let surface = tetrahedron();
        let mask = SelectionMask::new(4);

        let picked = faces_with_neighbours(&surface, &[0, 1], true, &mask).unwrap();
        assert_eq!(picked.faces, vec![0, 1, 2, 3]);
        assert_eq!(picked.added, 3);
    }

    #[test]
    fn no_expansion_without_flag() {
        let picked =
            faces_with_neighbours(&tetrahedron(), &[2], false, &SelectionMask::new(4)).unwrap();
        assert_eq!(picked.faces, vec![2]);
        assert_eq!(picked.added, 0);
    }

    #[test]
    fn face_out_of_range() {
        let err = faces_with_neighbours(&tetrahedron(), &[9], false, &SelectionMask::new(4))
            .unwrap_err();
        assert!(matches!(
            err,
            SubsetError::FaceOutOfRange {
                label: 9,
                face_count: 4
            }
        ));
    }

    #[test]
    fn side_of_reference_cube() {
        // One small triangle inside the unit cube, one well outside it.
        let mesh = IndexedMesh::from_raw(
            &[
                0.2, 0.2, 0.5, 0.4, 0.2, 0.5, 0.2, 0.4, 0.5, //
                2.0, 2.0, 2.0, 3.0, 2.0, 2.0, 2.0, 3.0, 2.0,
            ],
            &[0, 1, 2, 3, 4, 5],
        );
        let surface = Surface::new(mesh).unwrap();

        let tree = reference_octree(&unit_cube(), &OctreeConfig::default()).unwrap();
        let mask = SelectionMask::new(surface.face_count());

        let inside = faces_on_side(&surface, &tree, false, &mask, false);
        let outside = faces_on_side(&surface, &tree, true, &mask, false);
        assert_eq!(inside, vec![0]);
        assert_eq!(outside, vec![1]);
        assert_eq!(faces_on_side(&surface, &tree, true, &mask, true), outside);
    }

    #[test]
    fn side_skips_marked_faces() {
        let surface = Surface::new(unit_tetrahedron()).unwrap();
        let mut big = unit_cube();
        big.scale(4.0);
        big.translate(mesh_types::Vector3::new(-2.0, -2.0, -2.0));
        let tree = reference_octree(&big, &OctreeConfig::default()).unwrap();

        let mut mask = SelectionMask::new(4);
        mask.mark(0);
        assert_eq!(faces_on_side(&surface, &tree, false, &mask, false), vec![1, 2, 3]);
    }

    #[test]
    fn empty_reference_fails() {
        let err = reference_octree(&IndexedMesh::new(), &OctreeConfig::default()).unwrap_err();
        assert!(matches!(err, SubsetError::Octree(_)));
    }

    #[test]
    fn reference_with_missing_vertex_fails() {
        let mut cube = unit_cube();
        cube.faces[5] = [0, 3, 8];
        let err = reference_octree(&cube, &OctreeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SubsetError::InvalidFaceVertex {
                face: 5,
                index: 8,
                point_count: 8,
            }
        ));
    }
}
