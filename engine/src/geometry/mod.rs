//! Geometry Module
//!
//! Stateless primitives used by picking and brushing: segment/triangle and
//! segment/plane intersection, closest point on a triangle, point-in-triangle,
//! sphere/triangle overlap, point/segment distance and triangle measurements.
//!
//! # Submodules
//!
//! - [`types`] - `Aabb`, `Triangle` and the glam types re-exported
//! - [`intersect`] - Intersection and distance tests
//! - [`closest_point`] - Voronoi-region closest point on a triangle
//! - [`metrics`] - Triangle AABB, inradius, perpendicular vectors
//!
//! Degenerate configurations never produce errors: parallel segments and
//! misses return `None` (or the zero vector for the sentinel API), zero-length
//! edges collapse to their start point.

pub mod closest_point;
pub mod intersect;
pub mod metrics;
pub mod types;

pub use closest_point::{
    ClosestPoint, NormalMode, closest_point_on_mesh_triangle, closest_point_on_triangle,
};
pub use intersect::{
    POINT_IN_TRIANGLE_EPSILON, distance_to_segment_squared, point_in_triangle,
    ray_plane_intersect, ray_triangle_intersect, sphere_intersect_triangle,
    try_ray_plane_intersect, vertex_on_line,
};
pub use metrics::{inradius_squared, perpendicular_vector, triangle_aabb};
pub use types::{Aabb, EPSILON, EPSILON_SQR, Triangle, winding_normal};
