//! Selection parameters.

use crate::error::{SubsetError, SubsetResult};
use crate::surface::Surface;
use mesh_types::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A second surface whose inside or outside selects faces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceSurface {
    /// Name passed to the [`SurfaceResolver`](crate::SurfaceResolver).
    pub name: String,

    /// Select faces whose centroid is outside the reference surface when
    /// `true`, inside when `false`.
    pub outside: bool,
}

impl ReferenceSurface {
    /// Select faces outside the named surface.
    #[must_use]
    pub fn outside(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outside: true,
        }
    }

    /// Select faces inside the named surface.
    #[must_use]
    pub fn inside(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outside: false,
        }
    }
}

/// Which faces to select.
///
/// Labels are signed because they typically come straight from a user's
/// dictionary; negative labels are reported as out of range. All criteria
/// are combined with a logical OR, then the result is optionally inverted.
///
/// # Example
///
/// ```
/// use mesh_subset::{SubsetParams, ReferenceSurface};
/// use mesh_types::Point3;
///
/// let params = SubsetParams::default()
///     .with_local_points([0, 4])
///     .with_zone(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
///     .with_surface(ReferenceSurface::outside("box"))
///     .with_invert_selection(true);
///
/// assert_eq!(params.local_points, vec![0, 4]);
/// assert_eq!(params.zone.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SubsetParams {
    /// Select every face touching one of these points.
    pub local_points: Vec<i64>,

    /// Select every face touching one of these edges.
    pub edges: Vec<i64>,

    /// Select these faces.
    pub faces: Vec<i64>,

    /// Empty, or `[min, max]`: select faces whose centroid lies in the
    /// closed box.
    pub zone: Vec<Point3<f64>>,

    /// Also select the edge neighbours of every face in `faces`.
    pub add_face_neighbours: bool,

    /// Invert the combined selection.
    pub invert_selection: bool,

    /// Select faces by their position relative to another surface.
    pub surface: Option<ReferenceSurface>,
}

impl SubsetParams {
    /// Set the point labels.
    #[must_use]
    pub fn with_local_points(mut self, points: impl IntoIterator<Item = i64>) -> Self {
        self.local_points = points.into_iter().collect();
        self
    }

    /// Set the edge labels.
    #[must_use]
    pub fn with_edges(mut self, edges: impl IntoIterator<Item = i64>) -> Self {
        self.edges = edges.into_iter().collect();
        self
    }

    /// Set the face labels.
    #[must_use]
    pub fn with_faces(mut self, faces: impl IntoIterator<Item = i64>) -> Self {
        self.faces = faces.into_iter().collect();
        self
    }

    /// Set the zone to the closed box `[min, max]`.
    #[must_use]
    pub fn with_zone(mut self, min: Point3<f64>, max: Point3<f64>) -> Self {
        self.zone = vec![min, max];
        self
    }

    /// Enable or disable neighbour expansion of `faces`.
    #[must_use]
    pub const fn with_add_face_neighbours(mut self, add: bool) -> Self {
        self.add_face_neighbours = add;
        self
    }

    /// Enable or disable final inversion.
    #[must_use]
    pub const fn with_invert_selection(mut self, invert: bool) -> Self {
        self.invert_selection = invert;
        self
    }

    /// Set the reference surface.
    #[must_use]
    pub fn with_surface(mut self, surface: ReferenceSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Check every label and the zone against `surface`.
    ///
    /// # Errors
    ///
    /// - [`SubsetError::PointOutOfRange`], [`SubsetError::EdgeOutOfRange`]
    ///   or [`SubsetError::FaceOutOfRange`] for the first bad label.
    /// - [`SubsetError::InvalidZone`] if the zone has neither 0 nor 2 points.
    pub fn validate(&self, surface: &Surface) -> SubsetResult<()> {
        let point_count = surface.point_count();
        if let Some(&label) = self
            .local_points
            .iter()
            .find(|&&label| checked_index(label, point_count).is_none())
        {
            return Err(SubsetError::PointOutOfRange { label, point_count });
        }

        if !self.edges.is_empty() {
            let edge_count = surface.edge_count();
            if let Some(&label) = self
                .edges
                .iter()
                .find(|&&label| checked_index(label, edge_count).is_none())
            {
                return Err(SubsetError::EdgeOutOfRange { label, edge_count });
            }
        }

        let face_count = surface.face_count();
        if let Some(&label) = self
            .faces
            .iter()
            .find(|&&label| checked_index(label, face_count).is_none())
        {
            return Err(SubsetError::FaceOutOfRange { label, face_count });
        }

        if !matches!(self.zone.len(), 0 | 2) {
            return Err(SubsetError::InvalidZone {
                count: self.zone.len(),
            });
        }

        Ok(())
    }
}

/// Convert a signed label to an index below `len`.
#[inline]
pub(crate) fn checked_index(label: i64, len: usize) -> Option<usize> {
    usize::try_from(label).ok().filter(|&index| index < len)
}
