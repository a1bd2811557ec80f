//! Triangle measurements and small vector helpers.

use glam::Vec3;

use super::types::Aabb;

/// Bounding box of the triangle `v1, v2, v3`.
pub fn triangle_aabb(v1: Vec3, v2: Vec3, v3: Vec3) -> Aabb {
    Aabb {
        min: v1.min(v2).min(v3),
        max: v1.max(v2).max(v3),
    }
}

/// Squared radius of the triangle's incircle.
///
/// Heron's form `r^2 = (s - a)(s - b)(s - c) / s` with `s` the half
/// perimeter. Subdivision compares this against a brush-derived threshold,
/// so it stays squared. A triangle collapsed to a point returns 0.
pub fn inradius_squared(v1: Vec3, v2: Vec3, v3: Vec3) -> f32 {
    let a = (v1 - v2).length();
    let b = (v1 - v3).length();
    let c = (v2 - v3).length();
    let half_perimeter = (a + b + c) * 0.5;
    if half_perimeter == 0.0 {
        return 0.0;
    }
    (half_perimeter - a) * (half_perimeter - b) * (half_perimeter - c) / half_perimeter
}

/// Any vector perpendicular to `v`.
///
/// If a component of `v` is zero the matching unit axis is returned
/// (x checked first, then y, then z). Otherwise the result is the normalized
/// `(z, z, -(x + y))`. The zero vector maps to `Vec3::X`.
pub fn perpendicular_vector(v: Vec3) -> Vec3 {
    if v.x == 0.0 {
        Vec3::X
    } else if v.y == 0.0 {
        Vec3::Y
    } else if v.z == 0.0 {
        Vec3::Z
    } else {
        Vec3::new(v.z, v.z, -(v.x + v.y)).normalize()
    }
}
