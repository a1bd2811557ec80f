//! Closest point on a triangle
//!
//! The query point is projected onto the triangle plane (using the cached
//! normal) and the projection is classified against the three edges by the
//! sign of `edge x (projection - edge_start) . front`, where `front = e0 x e1`
//! is recomputed from the vertices so a flipped cached normal does not break
//! the classification:
//!
//! - three non-negative signs: the projection is inside
//! - one negative sign: the closest point is on that edge (clamped)
//! - two negative signs: the closest point is near the vertex both negative
//!   edges share
//!
//! Sculpting brushes call this for every vertex under the brush every frame,
//! so it allocates nothing and never fails on degenerate input.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::types::{EPSILON_SQR, Triangle};
use crate::mesh::VertexSource;

/// How the output normal of [`closest_point_on_triangle`] is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    /// Unit normal pointing from the surface towards the query point.
    ///
    /// Inside the triangle the cached normal is flipped when
    /// `normal . point < 0`. This is a cheap heuristic (it compares against the
    /// origin, not the triangle) and is only reliable for meshes roughly
    /// centered on the origin. Near-zero offsets fall back to the cached normal.
    #[default]
    Oriented,
    /// No orientation or normalization.
    ///
    /// Inside the triangle the cached normal is returned as is; on an edge or
    /// vertex the raw offset `point - position` is returned, un-normalized.
    Raw,
}

/// Result of a closest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// Closest point on the triangle
    pub position: Vec3,
    /// Surface normal at `position` (see [`NormalMode`])
    pub normal: Vec3,
    /// Squared distance from the query point to `position`
    pub distance_squared: f32,
}

/// Which Voronoi region of the triangle the projection fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Inside,
    /// Outside the edge starting at this vertex index
    Edge(usize),
    /// Outside both edges meeting at this vertex index
    Vertex(usize),
}

/// Closest point on a segment, returning the endpoints bit-exactly when the
/// projection is clamped.
#[inline]
fn closest_on_edge(point: Vec3, start: Vec3, end: Vec3) -> Vec3 {
    let edge = end - start;
    let length_sq = edge.length_squared();
    let dot = edge.dot(point - start);
    if dot <= 0.0 || length_sq == 0.0 {
        start
    } else if dot >= length_sq {
        end
    } else {
        start + edge * (dot / length_sq)
    }
}

fn classify(projection: Vec3, v: &[Vec3; 3]) -> Region {
    let front = (v[1] - v[0]).cross(v[2] - v[1]);

    let mut num_pos = 0;
    let mut last_pos = 0;
    let mut last_neg = 0;
    for i in 0..3 {
        let start = v[i];
        let end = v[(i + 1) % 3];
        let side = (end - start).cross(projection - start).dot(front);
        if 0.0 <= side {
            num_pos += 1;
            last_pos = i;
        } else {
            last_neg = i;
        }
    }

    match num_pos {
        3 => Region::Inside,
        2 => Region::Edge(last_neg),
        // The lone positive edge is opposite the shared vertex
        1 => Region::Vertex((last_pos + 2) % 3),
        _ => panic!(
            "closest point classification failed: no edge agrees for projection {projection:?} \
             on triangle {v:?} (NaN or degenerate input)"
        ),
    }
}

/// Finds the closest point on triangle `vertices` to `point`.
///
/// `normal` is the triangle's cached unit normal; it is used to project onto
/// the plane and is trusted even if stale. Inside the triangle the squared
/// distance is the squared signed plane distance.
///
/// # Panics
///
/// If the edge classification finds no non-negative sign, which only happens
/// for NaN coordinates. Callers processing untrusted meshes must reject
/// non-finite vertices first.
pub fn closest_point_on_triangle(
    point: Vec3,
    vertices: [Vec3; 3],
    normal: Vec3,
    mode: NormalMode,
) -> ClosestPoint {
    let projection = point - normal * normal.dot(point - vertices[0]);

    match classify(projection, &vertices) {
        Region::Inside => {
            let signed = normal.dot(point - projection);
            let normal = match mode {
                NormalMode::Oriented if normal.dot(point) < 0.0 => -normal,
                _ => normal,
            };
            ClosestPoint {
                position: projection,
                normal,
                distance_squared: signed * signed,
            }
        }
        Region::Edge(i) => {
            let position = closest_on_edge(point, vertices[i], vertices[(i + 1) % 3]);
            surface_offset(point, position, normal, mode)
        }
        Region::Vertex(i) => {
            // Obtuse corners leave part of the wedge closer to an edge
            // interior than to the corner, so test both adjacent edges.
            let corner = vertices[i];
            let prev = vertices[(i + 2) % 3];
            let next = vertices[(i + 1) % 3];
            let a = closest_on_edge(point, corner, prev);
            let b = closest_on_edge(point, corner, next);
            let position = if (point - b).length_squared() < (point - a).length_squared() {
                b
            } else {
                a
            };
            surface_offset(point, position, normal, mode)
        }
    }
}

#[inline]
fn surface_offset(point: Vec3, position: Vec3, normal: Vec3, mode: NormalMode) -> ClosestPoint {
    let offset = point - position;
    let distance_squared = offset.length_squared();
    let normal = match mode {
        NormalMode::Raw => offset,
        NormalMode::Oriented if distance_squared < EPSILON_SQR => normal,
        NormalMode::Oriented => offset / distance_squared.sqrt(),
    };
    ClosestPoint {
        position,
        normal,
        distance_squared,
    }
}

/// [`closest_point_on_triangle`] for a mesh triangle, reading positions
/// through `source`.
pub fn closest_point_on_mesh_triangle<S>(
    source: &S,
    triangle: &Triangle,
    point: Vec3,
    mode: NormalMode,
) -> ClosestPoint
where
    S: VertexSource + ?Sized,
{
    let [a, b, c] = triangle.indices;
    let vertices = [
        source.vertex_position(a),
        source.vertex_position(b),
        source.vertex_position(c),
    ];
    closest_point_on_triangle(point, vertices, triangle.normal, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> [Vec3; 3] {
        [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)]
    }

    #[test]
    fn test_point_above_centroid() {
        let tri = right_triangle();
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let h = 1.5;
        let p = centroid + Vec3::Z * h;
        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert!((cp.position - centroid).length() < 1e-5);
        assert_relative_eq!(cp.distance_squared, h * h, epsilon = 1e-5);
        assert_eq!(cp.normal, Vec3::Z);
    }

    #[test]
    fn test_point_below_flips_oriented_normal() {
        let tri = right_triangle();
        let p = Vec3::new(0.5, 0.5, -2.0);

        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert_eq!(cp.normal, Vec3::NEG_Z);
        assert_relative_eq!(cp.distance_squared, 4.0);

        let raw = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Raw);
        assert_eq!(raw.normal, Vec3::Z);
        assert_eq!(raw.position, cp.position);
    }

    #[test]
    fn test_point_at_vertex() {
        let tri = right_triangle();
        for v in tri {
            let cp = closest_point_on_triangle(v, tri, Vec3::Z, NormalMode::Oriented);
            assert!((cp.position - v).length() < 1e-6);
            assert!(cp.distance_squared < 1e-10);
            // Inside with zero offset keeps the cached normal
            assert!(cp.normal.abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn test_edge_region() {
        let tri = right_triangle();
        // Below the x axis edge
        let p = Vec3::new(1.0, -1.0, 0.0);
        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert_eq!(cp.position, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(cp.distance_squared, 1.0);
        assert_eq!(cp.normal, Vec3::NEG_Y);

        let p = Vec3::new(1.0, -3.0, 0.0);
        let raw = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Raw);
        assert_eq!(raw.normal, Vec3::new(0.0, -3.0, 0.0));
        assert_relative_eq!(raw.distance_squared, 9.0);
    }

    /// Hairline offsets outside an edge or corner keep the cached normal
    #[test]
    fn test_tiny_offset_falls_back_to_cached_normal() {
        let tri = right_triangle();

        // Just below the x axis edge
        let p = Vec3::new(1.0, -1e-7, 0.0);
        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert_eq!(cp.position, Vec3::new(1.0, 0.0, 0.0));
        assert!(cp.distance_squared < EPSILON_SQR);
        assert_eq!(cp.normal, Vec3::Z);

        // Just outside the corner at the origin
        let p = Vec3::new(-1e-7, -1e-7, 0.0);
        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert_eq!(cp.position, tri[0]);
        assert!(cp.distance_squared < EPSILON_SQR);
        assert_eq!(cp.normal, Vec3::Z);

        // Raw keeps the offset, however small
        let raw = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Raw);
        assert_eq!(raw.normal, p);
    }

    #[test]
    fn test_past_hypotenuse_end_returns_vertex() {
        let tri = right_triangle();
        // Outside the hypotenuse and the left edge, beyond (0, 2)
        let p = Vec3::new(-0.5, 3.0, 0.0);
        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert_eq!(cp.position, tri[2]);
        assert_relative_eq!(cp.distance_squared, 0.25 + 1.0);
    }

    #[test]
    fn test_vertex_region() {
        let tri = right_triangle();
        let p = Vec3::new(-1.0, -1.0, 1.0);
        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert_eq!(cp.position, tri[0]);
        assert_relative_eq!(cp.distance_squared, 3.0);
        assert_relative_eq!(cp.normal.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_obtuse_corner_wedge_prefers_edge() {
        // Corner at the origin with a 135 degree angle
        let tri = [Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), Vec3::new(-1.0, 1.0, 0.0)];
        // Outside both edges meeting at the origin, but right under the long edge
        let p = Vec3::new(0.5, -1.0, 0.0);
        let cp = closest_point_on_triangle(p, tri, Vec3::Z, NormalMode::Oriented);
        assert!((cp.position - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
        assert_relative_eq!(cp.distance_squared, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flipped_cached_normal_still_classifies() {
        let tri = right_triangle();
        let p = Vec3::new(0.5, 0.5, 1.0);
        let cp = closest_point_on_triangle(p, tri, Vec3::NEG_Z, NormalMode::Raw);
        assert!((cp.position - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
        assert_relative_eq!(cp.distance_squared, 1.0);
    }

    #[test]
    #[should_panic(expected = "classification failed")]
    fn test_nan_input_panics() {
        let tri = right_triangle();
        closest_point_on_triangle(Vec3::splat(f32::NAN), tri, Vec3::Z, NormalMode::Oriented);
    }

    #[test]
    fn test_mesh_triangle_lookup() {
        let vertices = vec![Vec3::new(9.0, 9.0, 9.0), Vec3::ZERO, Vec3::X, Vec3::Y];
        let tri = Triangle::new([1, 2, 3], Vec3::Z);
        let cp = closest_point_on_mesh_triangle(
            &vertices,
            &tri,
            Vec3::new(0.25, 0.25, 2.0),
            NormalMode::Oriented,
        );
        assert!((cp.position - Vec3::new(0.25, 0.25, 0.0)).length() < 1e-6);
        assert_relative_eq!(cp.distance_squared, 4.0);
    }
}
