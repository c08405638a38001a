//! Geometric primitives that can be stored in an [`Octree`](crate::Octree).

// Barycentric determinant terms read more clearly grouped this way.
#![allow(clippy::suspicious_operation_groupings)]

use mesh_types::{Aabb, Point3, Triangle, Vector3};

/// Barycentric margin below which a ray is considered to pass through an
/// edge or vertex rather than the interior.
const GRAZING_EPSILON: f64 = 1e-9;

/// Relative threshold for treating a ray as parallel to a triangle's plane.
const PARALLEL_EPSILON: f64 = 1e-12;

/// How a ray meets a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayCrossing {
    /// The ray does not meet the primitive.
    Miss,

    /// The ray passes cleanly through the primitive's interior.
    Crossing {
        /// Whether the ray leaves through the front side, i.e. travels along
        /// the primitive's normal.
        exiting: bool,
    },

    /// The ray touches an edge or vertex, runs in the primitive's plane, or
    /// starts on the primitive. The crossing cannot be counted reliably.
    Grazing,
}

/// A primitive that can be indexed and probed by an octree.
///
/// Implementations must be consistent: a primitive whose [`bounds`](Self::bounds)
/// miss a box must not report [`overlaps`](Self::overlaps) for it, and a
/// crossing reported by [`ray_crossing`](Self::ray_crossing) must lie inside
/// the bounds.
pub trait Primitive {
    /// Tight bounding box.
    fn bounds(&self) -> Aabb;

    /// Whether the primitive touches the box. May be conservative.
    fn overlaps(&self, aabb: &Aabb) -> bool;

    /// Squared distance from `point` to the primitive.
    fn distance_squared(&self, point: &Point3<f64>) -> f64;

    /// Classify the half-line `origin + t * direction`, `t >= 0`, against the
    /// primitive. `tolerance` is an absolute distance.
    fn ray_crossing(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
        tolerance: f64,
    ) -> RayCrossing;
}

impl Primitive for Triangle {
    fn bounds(&self) -> Aabb {
        Triangle::bounds(self)
    }

    fn overlaps(&self, aabb: &Aabb) -> bool {
        triangle_overlaps_box(self, aabb)
    }

    fn distance_squared(&self, point: &Point3<f64>) -> f64 {
        Triangle::distance_squared(self, point)
    }

    /// Möller–Trumbore with a barycentric margin for edge and vertex hits.
    fn ray_crossing(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
        tolerance: f64,
    ) -> RayCrossing {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let normal = edge1.cross(&edge2);
        let normal_len = normal.norm();
        if normal_len <= f64::EPSILON * edge1.norm() * edge2.norm() {
            // Zero-area triangles bound no volume.
            return RayCrossing::Miss;
        }

        let h = direction.cross(&edge2);
        let a = edge1.dot(&h);
        let s = origin - self.v0;

        if a.abs() <= PARALLEL_EPSILON * edge1.norm() * edge2.norm() * direction.norm() {
            // Ray parallel to the plane: only a ray running inside the plane
            // can touch the triangle.
            let plane_distance = s.dot(&normal).abs() / normal_len;
            return if plane_distance <= tolerance {
                RayCrossing::Grazing
            } else {
                RayCrossing::Miss
            };
        }

        let f = 1.0 / a;
        let u = f * s.dot(&h);
        let q = s.cross(&edge1);
        let v = f * direction.dot(&q);
        let w = 1.0 - u - v;

        if u < -GRAZING_EPSILON || v < -GRAZING_EPSILON || w < -GRAZING_EPSILON {
            return RayCrossing::Miss;
        }

        let distance = f * edge2.dot(&q) * direction.norm();
        if distance < -tolerance {
            return RayCrossing::Miss;
        }
        if distance <= tolerance {
            return RayCrossing::Grazing;
        }
        if u <= GRAZING_EPSILON || v <= GRAZING_EPSILON || w <= GRAZING_EPSILON {
            return RayCrossing::Grazing;
        }

        // `a` is -direction . normal.
        RayCrossing::Crossing { exiting: a < 0.0 }
    }
}

/// Separating-axis test between a triangle and a box.
///
/// Boundary contact counts as overlap.
#[must_use]
pub fn triangle_overlaps_box(triangle: &Triangle, aabb: &Aabb) -> bool {
    if aabb.is_empty() || !triangle.bounds().intersects(aabb) {
        return false;
    }

    let center = aabb.center();
    let half_extents = aabb.size() * 0.5;
    let v0 = triangle.v0 - center;
    let v1 = triangle.v1 - center;
    let v2 = triangle.v2 - center;

    let e0 = v1 - v0;
    let e1 = v2 - v1;
    let e2 = v0 - v2;

    if !axis_overlaps(&e0.cross(&e1), &half_extents, &v0, &v1, &v2) {
        return false;
    }

    let box_axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    for axis in &box_axes {
        for edge in [&e0, &e1, &e2] {
            let cross = axis.cross(edge);
            if cross.norm_squared() > f64::EPSILON * f64::EPSILON
                && !axis_overlaps(&cross, &half_extents, &v0, &v1, &v2)
            {
                return false;
            }
        }
    }

    true
}

/// Whether the projections of a centred box and a triangle onto `axis` overlap.
fn axis_overlaps(
    axis: &Vector3<f64>,
    half_extents: &Vector3<f64>,
    v0: &Vector3<f64>,
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
) -> bool {
    let p0 = axis.dot(v0);
    let p1 = axis.dot(v1);
    let p2 = axis.dot(v2);

    let radius = half_extents.x * axis.x.abs()
        + half_extents.y * axis.y.abs()
        + half_extents.z * axis.z.abs();

    p0.min(p1).min(p2) <= radius && p0.max(p1).max(p2) >= -radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Triangle {
        // Normal +Z.
        Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }

    fn up() -> Vector3<f64> {
        Vector3::z()
    }

    #[test]
    fn ray_through_interior_from_below_exits() {
        let hit = floor().ray_crossing(&Point3::new(0.25, 0.25, -1.0), &up(), 1e-12);
        assert_eq!(hit, RayCrossing::Crossing { exiting: true });
    }

    #[test]
    fn ray_through_interior_from_above_enters() {
        let hit = floor().ray_crossing(&Point3::new(0.25, 0.25, 1.0), &-up(), 1e-12);
        assert_eq!(hit, RayCrossing::Crossing { exiting: false });
    }

    #[test]
    fn ray_pointing_away_misses() {
        let hit = floor().ray_crossing(&Point3::new(0.25, 0.25, 1.0), &up(), 1e-12);
        assert_eq!(hit, RayCrossing::Miss);
    }

    #[test]
    fn ray_beside_triangle_misses() {
        let hit = floor().ray_crossing(&Point3::new(2.0, 2.0, -1.0), &up(), 1e-12);
        assert_eq!(hit, RayCrossing::Miss);
    }

    #[test]
    fn ray_through_edge_grazes() {
        let hit = floor().ray_crossing(&Point3::new(0.5, 0.0, -1.0), &up(), 1e-12);
        assert_eq!(hit, RayCrossing::Grazing);

        let hit = floor().ray_crossing(&Point3::new(0.5, 0.5, -1.0), &up(), 1e-12);
        assert_eq!(hit, RayCrossing::Grazing);
    }

    #[test]
    fn ray_through_vertex_grazes() {
        let hit = floor().ray_crossing(&Point3::new(0.0, 0.0, -1.0), &up(), 1e-12);
        assert_eq!(hit, RayCrossing::Grazing);
    }

    #[test]
    fn ray_in_plane_grazes() {
        let hit = floor().ray_crossing(&Point3::new(-1.0, 0.25, 0.0), &Vector3::x(), 1e-12);
        assert_eq!(hit, RayCrossing::Grazing);

        let hit = floor().ray_crossing(&Point3::new(-1.0, 0.25, 0.5), &Vector3::x(), 1e-12);
        assert_eq!(hit, RayCrossing::Miss);
    }

    #[test]
    fn origin_on_triangle_grazes() {
        let hit = floor().ray_crossing(&Point3::new(0.25, 0.25, 0.0), &up(), 1e-9);
        assert_eq!(hit, RayCrossing::Grazing);
    }

    #[test]
    fn degenerate_triangle_never_crosses() {
        let sliver = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let hit = sliver.ray_crossing(&Point3::new(0.5, 0.0, -1.0), &up(), 1e-12);
        assert_eq!(hit, RayCrossing::Miss);
    }

    #[test]
    fn overlap_with_box_containing_triangle() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(2.0, 2.0, 1.0));
        assert!(triangle_overlaps_box(&floor(), &aabb));
    }

    #[test]
    fn overlap_when_triangle_crosses_box() {
        // Large triangle whose vertices all lie outside the small box.
        let tri = Triangle::from_arrays([-10.0, -10.0, 0.5], [10.0, -10.0, 0.5], [0.0, 10.0, 0.5]);
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert!(triangle_overlaps_box(&tri, &aabb));
    }

    #[test]
    fn no_overlap_across_diagonal() {
        // Box near the hypotenuse corner, inside the triangle's bounding box
        // but beyond its slanted edge.
        let aabb = Aabb::new(Point3::new(0.8, 0.8, -0.1), Point3::new(0.9, 0.9, 0.1));
        assert!(floor().bounds().intersects(&aabb));
        assert!(!triangle_overlaps_box(&floor(), &aabb));
    }

    #[test]
    fn no_overlap_above_plane() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.5), Point3::new(1.0, 1.0, 1.0));
        assert!(!triangle_overlaps_box(&floor(), &aabb));
    }

    #[test]
    fn touching_box_overlaps() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.1, 0.1, 0.1));
        assert!(triangle_overlaps_box(&floor(), &aabb));
    }

    #[test]
    fn distance_matches_triangle() {
        let tri = floor();
        let p = Point3::new(0.2, 0.2, 0.5);
        assert!((Primitive::distance_squared(&tri, &p) - 0.25).abs() < 1e-12);
    }
}
