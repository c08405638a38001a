//! Per-face selection mask.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One flag per face of a surface.
///
/// Criteria only ever set flags; [`invert`](Self::invert) is applied at most
/// once, after every criterion has run.
///
/// # Example
///
/// ```
/// use mesh_subset::SelectionMask;
///
/// let mut mask = SelectionMask::new(4);
/// mask.mark_all([1, 3]);
/// assert_eq!(mask.count(), 2);
///
/// mask.invert();
/// assert_eq!(mask.selected().collect::<Vec<_>>(), vec![0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionMask {
    flags: Vec<bool>,
}

impl SelectionMask {
    /// A mask of `face_count` unselected faces.
    #[must_use]
    pub fn new(face_count: usize) -> Self {
        Self {
            flags: vec![false; face_count],
        }
    }

    /// Number of faces covered.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the mask covers no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether `face` is selected. Out-of-range faces are not.
    #[inline]
    #[must_use]
    pub fn is_marked(&self, face: usize) -> bool {
        self.flags.get(face).copied().unwrap_or(false)
    }

    /// Select `face`. Returns `true` if it was not selected before.
    ///
    /// Out-of-range faces are ignored.
    pub fn mark(&mut self, face: usize) -> bool {
        match self.flags.get_mut(face) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Select every face in `faces`, returning how many were newly selected.
    pub fn mark_all(&mut self, faces: impl IntoIterator<Item = usize>) -> usize {
        faces.into_iter().filter(|&face| self.mark(face)).count()
    }

    /// Flip every flag.
    pub fn invert(&mut self) {
        for flag in &mut self.flags {
            *flag = !*flag;
        }
    }

    /// Number of selected faces.
    #[must_use]
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    /// Indices of selected faces, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(face, &flag)| flag.then_some(face))
    }

    /// The flags as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }
}

impl From<Vec<bool>> for SelectionMask {
    fn from(flags: Vec<bool>) -> Self {
        Self { flags }
    }
}

impl From<SelectionMask> for Vec<bool> {
    fn from(mask: SelectionMask) -> Self {
        mask.flags
    }
}
