//! Core geometric types
//!
//! Vector and matrix types are re-exported from glam. This module adds the
//! two value types the primitives and the grid share: [`Aabb`] and [`Triangle`].

use bytemuck::{Pod, Zeroable};
pub use glam::{DMat4, DVec3, DVec4, Mat4, Vec2, Vec3};

/// Tolerance used to detect degenerate (zero-length) offsets.
pub const EPSILON: f32 = 1e-6;

/// Squared form of [`EPSILON`], compared against squared distances.
pub const EPSILON_SQR: f32 = EPSILON * EPSILON;

// ============================================================================
// AABB
// ============================================================================

/// Axis-aligned bounding box.
///
/// `min[i] <= max[i]` on every axis. Zero-volume boxes are valid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners.
    ///
    /// The corners are sorted per axis, so the order of the arguments does
    /// not matter.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    /// Size along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether `point` lies inside or on the boundary.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Grow every side by `ratio` times the box extent on that axis.
    pub fn expanded_by_ratio(&self, ratio: f32) -> Self {
        let shift = self.extent() * ratio;
        Self {
            min: self.min - shift,
            max: self.max + shift,
        }
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

// ============================================================================
// TRIANGLE
// ============================================================================

/// A mesh triangle: three vertex indices plus a cached unit normal.
///
/// The normal reflects the winding at the time it was last updated and may be
/// stale relative to the vertex positions. Routines in this crate trust it
/// rather than recomputing it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    /// Vertex indices into an external vertex store
    pub indices: [u32; 3],
    /// Cached unit normal
    pub normal: Vec3,
}

static_assertions::assert_eq_size!(Triangle, [u8; 24]);

impl Triangle {
    /// Create a triangle with an explicit cached normal.
    pub fn new(indices: [u32; 3], normal: Vec3) -> Self {
        Self { indices, normal }
    }

    /// Create a triangle whose normal is computed from the given positions.
    pub fn with_normal_from(indices: [u32; 3], positions: [Vec3; 3]) -> Self {
        Self {
            indices,
            normal: winding_normal(positions),
        }
    }
}

/// Unit normal `normalize((v1 - v0) x (v2 - v1))`, zero for degenerate triangles.
pub fn winding_normal([v0, v1, v2]: [Vec3; 3]) -> Vec3 {
    (v1 - v0).cross(v2 - v1).normalize_or_zero()
}
