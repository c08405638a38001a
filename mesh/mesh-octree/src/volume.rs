//! Point classification result.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a point lies relative to the surface an octree indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VolumeType {
    /// Enclosed by the surface.
    Inside,
    /// Not enclosed by the surface.
    Outside,
    /// On the surface within tolerance, or undecidable.
    Mixed,
}

impl VolumeType {
    /// Whether the classification is definite.
    #[inline]
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Mixed)
    }
}

impl fmt::Display for VolumeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
            Self::Mixed => "mixed",
        };
        f.write_str(name)
    }
}
