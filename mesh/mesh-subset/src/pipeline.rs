//! Selection followed by compaction.

use tracing::info;

use crate::compact::{Subset, compact};
use crate::config::SubsetConfig;
use crate::error::SubsetResult;
use crate::params::SubsetParams;
use crate::resolver::SurfaceResolver;
use crate::select::{SelectionReport, select_faces};
use crate::stats::SurfaceStats;
use crate::surface::Surface;

/// Everything produced by [`subset_surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetOutcome {
    /// The compacted mesh and its index maps.
    pub subset: Subset,

    /// Per-criterion counts from selection.
    pub report: SelectionReport,

    /// Statistics of the input surface.
    pub original: SurfaceStats,

    /// Statistics of the compacted mesh.
    pub result: SurfaceStats,
}

/// Select faces of `surface` and compact them into a new mesh.
///
/// # Errors
///
/// Any error from [`select_faces`] or [`compact`].
///
/// # Example
///
/// ```
/// use mesh_subset::{subset_surface, NoSurfaces, Surface, SubsetConfig, SubsetParams};
/// use mesh_types::unit_cube;
///
/// let surface = Surface::new(unit_cube()).unwrap();
/// let params = SubsetParams::default().with_local_points([6]);
///
/// let outcome = subset_surface(&surface, &params, &NoSurfaces, &SubsetConfig::default()).unwrap();
/// assert_eq!(outcome.original.faces, 12);
/// assert_eq!(outcome.result.faces, outcome.report.selected);
/// assert_eq!(outcome.subset.point_map.len(), outcome.result.points);
/// ```
pub fn subset_surface<R>(
    surface: &Surface,
    params: &SubsetParams,
    resolver: &R,
    config: &SubsetConfig,
) -> SubsetResult<SubsetOutcome>
where
    R: SurfaceResolver + ?Sized,
{
    let original = SurfaceStats::of(surface.mesh());
    info!("Original: {}", original);

    let selection = select_faces(surface, params, resolver, config)?;
    let subset = compact(surface.mesh(), &selection.mask)?;

    let result = SurfaceStats::of(&subset.mesh);
    info!("Subset: {}", result);

    Ok(SubsetOutcome {
        subset,
        report: selection.report,
        original,
        result,
    })
}
