//! The selection engine.

use tracing::{debug, info};

use crate::config::SubsetConfig;
use crate::criteria::{
    faces_at_edges, faces_at_points, faces_in_zone, faces_on_side, faces_with_neighbours,
    reference_octree,
};
use crate::error::{SubsetError, SubsetResult};
use crate::mask::SelectionMask;
use crate::params::SubsetParams;
use crate::resolver::SurfaceResolver;
use crate::surface::Surface;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What each criterion contributed to a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionReport {
    /// Number of point labels given.
    pub points_listed: usize,

    /// Number of edge labels given.
    pub edges_listed: usize,

    /// Number of face labels given.
    pub faces_listed: usize,

    /// Faces whose centroid lies in the zone.
    pub zone_matches: usize,

    /// Previously unselected faces on the requested side of the reference
    /// surface.
    pub surface_matches: usize,

    /// Neighbours selected by face-neighbour expansion that were not
    /// already selected.
    pub neighbours_added: usize,

    /// Whether the selection was inverted.
    pub inverted: bool,

    /// Faces selected at the end.
    pub selected: usize,
}

/// Result of [`select_faces`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Selection {
    /// One flag per face of the surface.
    pub mask: SelectionMask,

    /// Per-criterion counts.
    pub report: SelectionReport,
}

/// Select faces of `surface` according to `params`.
///
/// Criteria are applied in a fixed order and combined with a logical OR:
///
/// 1. faces touching a listed point
/// 2. faces touching a listed edge
/// 3. faces whose centroid lies in the zone
/// 4. unselected faces whose centroid lies on the requested side of the
///    reference surface
/// 5. listed faces and, optionally, their edge neighbours
///
/// The union is inverted last if requested.
///
/// All labels and the zone are checked, and the reference surface is
/// resolved and indexed, before any face is selected.
///
/// # Errors
///
/// - [`SubsetError::PointOutOfRange`], [`SubsetError::EdgeOutOfRange`] or
///   [`SubsetError::FaceOutOfRange`] for a bad label.
/// - [`SubsetError::InvalidZone`] for a zone that is not a min/max pair.
/// - [`SubsetError::ReferenceSurfaceNotFound`] if `resolver` does not know
///   the reference surface.
/// - [`SubsetError::InvalidFaceVertex`] if a reference surface face names a
///   missing vertex.
/// - [`SubsetError::Octree`] if the reference surface is empty or the octree
///   settings are invalid.
///
/// # Example
///
/// ```
/// use mesh_subset::{select_faces, NoSurfaces, Surface, SubsetConfig, SubsetParams};
/// use mesh_types::unit_tetrahedron;
///
/// let surface = Surface::new(unit_tetrahedron()).unwrap();
/// let params = SubsetParams::default().with_faces([0]).with_add_face_neighbours(true);
///
/// let selection = select_faces(&surface, &params, &NoSurfaces, &SubsetConfig::default()).unwrap();
/// assert_eq!(selection.mask.count(), 4);
/// assert_eq!(selection.report.neighbours_added, 3);
/// ```
pub fn select_faces<R>(
    surface: &Surface,
    params: &SubsetParams,
    resolver: &R,
    config: &SubsetConfig,
) -> SubsetResult<Selection>
where
    R: SurfaceResolver + ?Sized,
{
    params.validate(surface)?;

    let reference = match &params.surface {
        Some(reference) => {
            let mesh = resolver.resolve(&reference.name).ok_or_else(|| {
                SubsetError::ReferenceSurfaceNotFound {
                    name: reference.name.clone(),
                }
            })?;
            let tree = reference_octree(&mesh, &config.octree)?;
            debug!(
                name = %reference.name,
                faces = tree.primitive_count(),
                leaves = tree.leaf_count(),
                depth = tree.depth(),
                "Indexed reference surface"
            );
            Some((reference, tree))
        }
        None => None,
    };

    let mut mask = SelectionMask::new(surface.face_count());
    let mut report = SelectionReport::default();

    report.points_listed = params.local_points.len();
    if !params.local_points.is_empty() {
        info!("Found {} marked point(s).", report.points_listed);
    }
    mask.mark_all(faces_at_points(surface, &params.local_points)?);

    report.edges_listed = params.edges.len();
    if !params.edges.is_empty() {
        info!("Found {} marked edge(s).", report.edges_listed);
    }
    mask.mark_all(faces_at_edges(surface, &params.edges)?);

    if let [min, max] = params.zone.as_slice() {
        info!("Using zone min: {:?} max: {:?}", min, max);
        let matched = faces_in_zone(surface, &params.zone)?;
        report.zone_matches = matched.len();
        mask.mark_all(matched);
    }

    if let Some((reference, tree)) = &reference {
        let side = if reference.outside { "outside" } else { "inside" };
        info!(
            "Selecting all triangles with centre {} surface {}",
            side, reference.name
        );
        let matched = faces_on_side(surface, tree, reference.outside, &mask, config.parallel);
        report.surface_matches = matched.len();
        mask.mark_all(matched);
    }

    report.faces_listed = params.faces.len();
    if !params.faces.is_empty() {
        info!("Found {} marked face(s).", report.faces_listed);
    }
    let picked = faces_with_neighbours(
        surface,
        &params.faces,
        params.add_face_neighbours,
        &mask,
    )?;
    mask.mark_all(picked.faces);
    report.neighbours_added = picked.added;
    if params.add_face_neighbours {
        info!(
            "Added {} faces because of addFaceNeighbours",
            report.neighbours_added
        );
    }

    if params.invert_selection {
        info!("Inverting selection.");
        mask.invert();
        report.inverted = true;
    }

    report.selected = mask.count();
    info!(
        selected = report.selected,
        total = surface.face_count(),
        "Face selection complete"
    );

    Ok(Selection { mask, report })
}
