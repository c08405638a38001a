//! Extraction of selected faces into a standalone mesh.

// New point indices are bounded by the number of distinct u32 face indices.
#![allow(clippy::cast_possible_truncation)]

use mesh_types::IndexedMesh;
use tracing::debug;

use crate::error::{SubsetError, SubsetResult};
use crate::mask::SelectionMask;

/// A compacted mesh together with its links back to the original.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subset {
    /// Retained faces over retained points only.
    pub mesh: IndexedMesh,

    /// Original index of each retained point, ascending.
    pub point_map: Vec<usize>,

    /// Original index of each retained face, ascending.
    pub face_map: Vec<usize>,
}

impl Subset {
    /// Whether no face was retained.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_map.is_empty()
    }
}

/// Copy the faces selected in `mask`, and only the points they use, into a
/// new mesh.
///
/// Faces keep their original relative order, as do points. Each retained
/// point is copied whole, attributes included, and face indices are
/// rewritten to the new numbering. An empty selection gives an empty mesh.
///
/// # Errors
///
/// - [`SubsetError::MaskLengthMismatch`] if `mask` does not have one entry
///   per face.
/// - [`SubsetError::InvalidFaceVertex`] if a retained face references a
///   missing point.
///
/// # Example
///
/// ```
/// use mesh_subset::{compact, SelectionMask};
/// use mesh_types::unit_tetrahedron;
///
/// let mesh = unit_tetrahedron();
/// let mut mask = SelectionMask::new(mesh.faces.len());
/// mask.mark(3);
///
/// let subset = compact(&mesh, &mask).unwrap();
/// assert_eq!(subset.point_map, vec![1, 2, 3]);
/// assert_eq!(subset.face_map, vec![3]);
/// assert_eq!(subset.mesh.faces, vec![[0, 1, 2]]);
/// ```
pub fn compact(mesh: &IndexedMesh, mask: &SelectionMask) -> SubsetResult<Subset> {
    if mask.len() != mesh.faces.len() {
        return Err(SubsetError::MaskLengthMismatch {
            expected: mesh.faces.len(),
            actual: mask.len(),
        });
    }

    let face_map: Vec<usize> = mask.selected().collect();
    let point_count = mesh.vertices.len();

    let mut used = vec![false; point_count];
    for &face in &face_map {
        for &index in &mesh.faces[face] {
            let slot = used
                .get_mut(index as usize)
                .ok_or(SubsetError::InvalidFaceVertex {
                    face,
                    index,
                    point_count,
                })?;
            *slot = true;
        }
    }

    let point_map: Vec<usize> = used
        .iter()
        .enumerate()
        .filter_map(|(point, &flag)| flag.then_some(point))
        .collect();

    // Old point index to new; only entries for retained points are read.
    let mut remap = vec![0_u32; point_count];
    for (new_index, &old_index) in point_map.iter().enumerate() {
        remap[old_index] = new_index as u32;
    }

    let vertices = point_map
        .iter()
        .map(|&old_index| mesh.vertices[old_index].clone())
        .collect();
    let faces = face_map
        .iter()
        .map(|&face| mesh.faces[face].map(|index| remap[index as usize]))
        .collect();

    debug!(
        faces = face_map.len(),
        points = point_map.len(),
        "Compacted selection"
    );

    Ok(Subset {
        mesh: IndexedMesh::from_parts(vertices, faces),
        point_map,
        face_map,
    })
}
