//! Intersection and distance primitives
//!
//! Segment/triangle and segment/plane intersection, point-in-triangle,
//! sphere/triangle overlap and point/segment distance. All functions are
//! stateless and never fail: degenerate input resolves to "no intersection"
//! or a boundary value.
//!
//! # Example
//!
//! ```ignore
//! use clay_sculpt_engine::geometry::{ray_triangle_intersect, point_in_triangle};
//! use glam::Vec3;
//!
//! let (v1, v2, v3) = (Vec3::ZERO, Vec3::X, Vec3::Y);
//! let hit = ray_triangle_intersect(
//!     Vec3::new(0.2, 0.2, 1.0),
//!     Vec3::new(0.2, 0.2, -1.0),
//!     v1, v2, v3,
//!     Vec3::Z,
//! );
//! if let Some(p) = hit {
//!     assert!(point_in_triangle(p, v1, v2, v3));
//! }
//! ```

use glam::Vec3;

/// Absolute tolerance of the area-sum test in [`point_in_triangle`].
pub const POINT_IN_TRIANGLE_EPSILON: f32 = 1e-4;

/// Signed distances of the segment endpoints to a plane, or `None` when the
/// segment does not cross it.
///
/// Both endpoints on the same side (or on the plane) means no crossing. The
/// exact-equality parallel test is kept even though the same-side test
/// already rejects it.
#[inline]
fn plane_crossing(s1: Vec3, s2: Vec3, plane_point: Vec3, normal: Vec3) -> Option<Vec3> {
    let dist1 = (s1 - plane_point).dot(normal);
    let dist2 = (s2 - plane_point).dot(normal);
    if dist1 * dist2 >= 0.0 {
        return None;
    }
    if dist1 == dist2 {
        // Segment parallel to the plane
        return None;
    }
    Some(s1 + (s2 - s1) * (-dist1 / (dist2 - dist1)))
}

/// Intersects the segment `s1`-`s2` with the triangle `v1, v2, v3`.
///
/// `normal` is the triangle's cached unit normal and defines both the plane
/// and the inside orientation: a point is inside when
/// `normal . (edge x (point - edge_start))` is non-negative for all three
/// edges.
///
/// # Returns
/// * `Some(Vec3)` - The crossing point, inside the triangle
/// * `None` - Endpoints on the same side, segment parallel, or crossing outside
pub fn ray_triangle_intersect(
    s1: Vec3,
    s2: Vec3,
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
    normal: Vec3,
) -> Option<Vec3> {
    let hit = plane_crossing(s1, s2, v1, normal)?;

    for (start, end) in [(v1, v2), (v2, v3), (v3, v1)] {
        if normal.dot((end - start).cross(hit - start)) < 0.0 {
            return None;
        }
    }

    Some(hit)
}

/// Intersects the segment `s1`-`s2` with the plane through `plane_point`.
///
/// Same rejection rules as [`ray_triangle_intersect`] without the inside test.
pub fn try_ray_plane_intersect(
    s1: Vec3,
    s2: Vec3,
    plane_point: Vec3,
    normal: Vec3,
) -> Option<Vec3> {
    plane_crossing(s1, s2, plane_point, normal)
}

/// Sentinel form of [`try_ray_plane_intersect`].
///
/// Returns `Vec3::ZERO` when there is no intersection. A genuine hit at the
/// origin is indistinguishable from a miss; use the `try_` form when that
/// matters.
pub fn ray_plane_intersect(s1: Vec3, s2: Vec3, plane_point: Vec3, normal: Vec3) -> Vec3 {
    try_ray_plane_intersect(s1, s2, plane_point, normal).unwrap_or(Vec3::ZERO)
}

/// Area-sum point-in-triangle test.
///
/// The point is inside when the three sub-triangle areas add up to the
/// triangle area within [`POINT_IN_TRIANGLE_EPSILON`]. Areas are compared as
/// cross-product lengths (twice the area), so the tolerance is absolute and
/// does not scale with the triangle.
pub fn point_in_triangle(point: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> bool {
    let vec1 = v1 - v2;
    let vec2 = v1 - v3;
    let vec_p1 = point - v2;
    let vec_p2 = point - v3;

    let total = vec1.cross(vec2).length();
    let area1 = vec1.cross(vec_p1).length();
    let area2 = vec2.cross(vec_p2).length();
    let area3 = vec_p1.cross(vec_p2).length();

    (total - (area1 + area2 + area3)).abs() < POINT_IN_TRIANGLE_EPSILON
}

/// Whether a sphere touches any edge of the triangle.
///
/// Only the three edges are tested: a sphere floating above the interior of a
/// large triangle without reaching an edge is not reported.
pub fn sphere_intersect_triangle(
    center: Vec3,
    radius_squared: f32,
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
) -> bool {
    distance_to_segment_squared(center, v1, v2) < radius_squared
        || distance_to_segment_squared(center, v2, v3) < radius_squared
        || distance_to_segment_squared(center, v1, v3) < radius_squared
}

/// Squared distance from `point` to the segment `v1`-`v2`.
///
/// The projection parameter is clamped to `[0, 1]`. A zero-length segment
/// behaves as the single point `v1`.
pub fn distance_to_segment_squared(point: Vec3, v1: Vec3, v2: Vec3) -> f32 {
    let edge = v2 - v1;
    let length_sq = edge.length_squared();
    if length_sq == 0.0 {
        return (point - v1).length_squared();
    }

    let t = (point - v1).dot(edge) / length_sq;
    if t < 0.0 {
        return (point - v1).length_squared();
    }
    if t > 1.0 {
        return (point - v2).length_squared();
    }
    (point - (v1 + edge * t)).length_squared()
}

/// Orthogonal projection of `point` onto the infinite line through
/// `line_start` and `line_end`.
///
/// A zero-length line returns `line_start`.
pub fn vertex_on_line(point: Vec3, line_start: Vec3, line_end: Vec3) -> Vec3 {
    let ab = line_end - line_start;
    let ab_sq = ab.length_squared();
    if ab_sq == 0.0 {
        return line_start;
    }
    line_start + ab * (ab.dot(point - line_start) / ab_sq)
}
