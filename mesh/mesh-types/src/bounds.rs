//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Defined by its minimum and maximum corners. Boxes are closed: points on
/// the boundary are contained.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// assert!(aabb.contains(&Point3::new(10.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners, sorting each axis so `min <= max`.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Cube of half-width `radius` centred on `point`.
    #[must_use]
    pub fn around(point: &Point3<f64>, radius: f64) -> Self {
        let r = Vector3::new(radius, radius, radius);
        Self {
            min: point - r,
            max: point + r,
        }
    }

    /// An inverted box that contains nothing.
    ///
    /// Useful as the starting point for [`expand_to_include`](Self::expand_to_include).
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point of the iterator.
    ///
    /// Returns an empty box for an empty iterator.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Whether `min > max` on any axis.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Centre point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Length of the diagonal; zero for empty boxes.
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.size().norm()
    }

    /// Volume; zero for empty boxes.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Whether the box contains a point (boundary inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Whether `other` lies entirely inside this box (boundary inclusive).
    ///
    /// An empty `other` is contained by any box.
    #[must_use]
    pub fn contains_aabb(&self, other: &Self) -> bool {
        other.is_empty() || (self.contains(&other.min) && self.contains(&other.max))
    }

    /// Whether the boxes overlap; touching boxes count as overlapping.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Enclosing box of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Grow the box in place to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Box grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector3::new(margin, margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// One of the eight boxes obtained by splitting at the centre.
    ///
    /// Octant `i` takes the upper half along x when `i & 1` is set, along y
    /// when `i & 2` is set and along z when `i & 4` is set.
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0));
    /// let top = aabb.octant(7);
    /// assert_eq!(top.min, Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(top.max, Point3::new(2.0, 2.0, 2.0));
    /// ```
    #[must_use]
    pub fn octant(&self, index: usize) -> Self {
        let mid = self.center();
        let mut min = self.min;
        let mut max = mid;
        for axis in 0..3 {
            if index & (1 << axis) != 0 {
                min[axis] = mid[axis];
                max[axis] = self.max[axis];
            }
        }
        Self { min, max }
    }

    /// Octant index of the centre-split child containing `point`.
    ///
    /// Points on a splitting plane go to the upper child.
    #[must_use]
    pub fn octant_of(&self, point: &Point3<f64>) -> usize {
        let mid = self.center();
        (0..3)
            .filter(|&axis| point[axis] >= mid[axis])
            .fold(0, |index, axis| index | (1 << axis))
    }

    /// Randomly enlarged copy of the box.
    ///
    /// The span is first made three-dimensional: no axis is thinner than
    /// `fraction` times the diagonal. Each face is then pushed outward by
    /// `fraction * U[0, 1) * span` on its axis, drawn independently per face.
    /// The result always contains the original box, so callers can use a
    /// seeded generator to keep splitting planes off primitives while staying
    /// reproducible.
    ///
    /// A zero-size box uses a unit diagonal.
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 0.0));
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let jittered = aabb.jittered(&mut rng, 1e-4);
    ///
    /// assert!(jittered.contains_aabb(&aabb));
    /// ```
    #[must_use]
    pub fn jittered<R: Rng + ?Sized>(&self, rng: &mut R, fraction: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        let size = self.size();
        let diagonal = if size.norm() > 0.0 { size.norm() } else { 1.0 };
        let span = size.map(|s| s.max(fraction * diagonal));

        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..3 {
            min[axis] -= fraction * rng.r#gen::<f64>() * span[axis];
            max[axis] += fraction * rng.r#gen::<f64>() * span[axis];
        }
        Self { min, max }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
