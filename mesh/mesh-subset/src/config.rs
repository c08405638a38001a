//! Execution settings for selection.

use mesh_octree::OctreeConfig;

use crate::error::SubsetResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How selection is carried out.
///
/// This does not change which faces are selected, only the octree built
/// over the reference surface and whether centroids are classified on the
/// rayon thread pool.
///
/// # Example
///
/// ```
/// use mesh_subset::SubsetConfig;
/// use mesh_octree::OctreeConfig;
///
/// let config = SubsetConfig::default()
///     .with_parallel(true)
///     .with_octree(OctreeConfig::default().with_max_depth(6));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubsetConfig {
    /// Octree settings for the reference surface.
    pub octree: OctreeConfig,

    /// Classify face centroids in parallel.
    pub parallel: bool,
}

impl SubsetConfig {
    /// Set the octree settings.
    #[must_use]
    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    /// Enable or disable parallel classification.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the octree settings.
    ///
    /// # Errors
    ///
    /// Returns [`SubsetError::Octree`](crate::SubsetError::Octree) if the
    /// octree settings are invalid.
    pub fn validate(&self) -> SubsetResult<()> {
        Ok(self.octree.validate()?)
    }
}
