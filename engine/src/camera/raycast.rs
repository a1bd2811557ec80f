//! Raycast Module
//!
//! Picks mesh triangles under the cursor. The screen point is unprojected to
//! a near/far segment and tested against every triangle with
//! [`ray_triangle_intersect`]; the hit closest to the near point wins.
//!
//! This is a brute-force pass over the given triangles. Callers with large
//! meshes narrow the triangle set first (octree, grid) and pass the subset.

use glam::{Vec2, Vec3};
use tracing::trace;

use super::projection::{CameraTransforms, ScreenRay, Viewport, unproject_screen_ray};
use crate::geometry::{Triangle, ray_triangle_intersect};
use crate::mesh::{TriangleMesh, VertexSource};

/// Information about a segment-triangle hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// World-space position of the hit
    pub position: Vec3,
    /// Cached normal of the hit triangle
    pub normal: Vec3,
    /// Index of the hit triangle in the slice that was searched
    pub triangle: usize,
    /// Distance from the segment start to the hit
    pub distance: f32,
}

/// Closest triangle crossed by the segment `near`-`far`.
///
/// # Returns
/// * `Some(TriangleHit)` - The hit nearest to `near`
/// * `None` - The segment crosses no triangle
pub fn pick_triangle<S>(
    source: &S,
    triangles: &[Triangle],
    near: Vec3,
    far: Vec3,
) -> Option<TriangleHit>
where
    S: VertexSource + ?Sized,
{
    let mut closest: Option<TriangleHit> = None;
    let mut closest_dist = f32::INFINITY;

    for (i, tri) in triangles.iter().enumerate() {
        let [a, b, c] = tri.indices.map(|v| source.vertex_position(v));
        if let Some(position) = ray_triangle_intersect(near, far, a, b, c, tri.normal) {
            let distance = (position - near).length();
            if distance < closest_dist {
                closest = Some(TriangleHit {
                    position,
                    normal: tri.normal,
                    triangle: i,
                    distance,
                });
                closest_dist = distance;
            }
        }
    }

    closest
}

/// Whether the segment `near`-`far` crosses any triangle.
///
/// Faster than [`pick_triangle`] when only a yes/no answer is needed.
pub fn segment_hits_any<S>(source: &S, triangles: &[Triangle], near: Vec3, far: Vec3) -> bool
where
    S: VertexSource + ?Sized,
{
    triangles.iter().any(|tri| {
        let [a, b, c] = tri.indices.map(|v| source.vertex_position(v));
        ray_triangle_intersect(near, far, a, b, c, tri.normal).is_some()
    })
}

/// Unproject `screen` and pick the closest triangle of `mesh` under it.
pub fn pick_from_screen(
    mesh: &TriangleMesh,
    screen: Vec2,
    viewport: Viewport,
    camera: &CameraTransforms,
) -> Option<TriangleHit> {
    let ScreenRay { near, far } = unproject_screen_ray(screen, viewport, camera)?;
    let hit = pick_triangle(mesh, mesh.triangles(), near, far);
    trace!(?screen, hit = ?hit.map(|h| h.triangle), "Screen pick");
    hit
}
