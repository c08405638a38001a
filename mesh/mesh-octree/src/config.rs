//! Octree build and query settings.
//!
//! [`OctreeConfig::default()`] holds the settings used when a reference
//! surface is indexed for inside/outside selection: depth 8, ten primitives
//! per leaf, a duplicity budget of 3 and the fixed jitter seed `354_543`.
//!
//! # Example
//!
//! ```
//! use mesh_octree::OctreeConfig;
//!
//! let config = OctreeConfig::default()
//!     .with_max_depth(6)
//!     .with_leaf_capacity(4)
//!     .with_seed(42);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{OctreeError, OctreeResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`Octree::build`](crate::Octree::build).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OctreeConfig {
    /// Maximum refinement depth. Zero keeps a single root leaf.
    pub max_depth: usize,

    /// A leaf holding more than this many primitives is split.
    pub leaf_capacity: usize,

    /// Upper bound on total leaf entries as a multiple of the primitive count.
    /// Primitives straddling split planes are registered in several leaves;
    /// refinement stops before a level that would exceed this budget.
    pub duplicity: f64,

    /// Seed for the bounding-volume jitter.
    pub seed: u64,

    /// Jitter applied to the bounding volume, relative to its span.
    pub perturbation: f64,

    /// Distance below which a point counts as lying on a primitive, relative
    /// to the diagonal of the jittered bounding volume.
    pub tolerance: f64,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            leaf_capacity: 10,
            duplicity: 3.0,
            seed: 354_543,
            perturbation: 1e-4,
            tolerance: 1e-10,
        }
    }
}

impl OctreeConfig {
    /// Set the maximum refinement depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the leaf capacity.
    #[must_use]
    pub const fn with_leaf_capacity(mut self, leaf_capacity: usize) -> Self {
        self.leaf_capacity = leaf_capacity;
        self
    }

    /// Set the duplicity budget.
    #[must_use]
    pub const fn with_duplicity(mut self, duplicity: f64) -> Self {
        self.duplicity = duplicity;
        self
    }

    /// Set the jitter seed.
    ///
    /// The same seed and inputs always produce the same tree.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the relative bounding-volume jitter.
    #[must_use]
    pub const fn with_perturbation(mut self, perturbation: f64) -> Self {
        self.perturbation = perturbation;
        self
    }

    /// Set the relative on-surface tolerance.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_octree::OctreeConfig;
    ///
    /// let loose = OctreeConfig::default().with_tolerance(1e-6);
    /// assert!(loose.tolerance > OctreeConfig::default().tolerance);
    /// ```
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns [`OctreeError::InvalidConfig`] if the leaf capacity is zero,
    /// the duplicity is below one or not finite, or the perturbation or
    /// tolerance is negative or not finite.
    pub fn validate(&self) -> OctreeResult<()> {
        if self.leaf_capacity == 0 {
            return Err(invalid("leaf_capacity must be at least 1"));
        }
        if !self.duplicity.is_finite() || self.duplicity < 1.0 {
            return Err(invalid(format!(
                "duplicity must be finite and at least 1, got {}",
                self.duplicity
            )));
        }
        if !self.perturbation.is_finite() || self.perturbation < 0.0 {
            return Err(invalid(format!(
                "perturbation must be finite and non-negative, got {}",
                self.perturbation
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(invalid(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

fn invalid(details: impl Into<String>) -> OctreeError {
    OctreeError::InvalidConfig {
        details: details.into(),
    }
}
