//! Mesh Module
//!
//! The vertex accessor the core reads positions through, plus a minimal
//! in-memory triangle mesh.
//!
//! The grid and the closest-point routines only ever see [`VertexSource`]:
//! an index-to-position lookup borrowed for the duration of one call. Nothing
//! in the core keeps positions around, so a mesh may be edited freely between
//! calls (stale grid indices then refer to the new positions).

use glam::Vec3;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::geometry::{
    Aabb, ClosestPoint, NormalMode, Triangle, closest_point_on_mesh_triangle, winding_normal,
};

/// Read-only lookup of vertex positions by index.
///
/// Callers guarantee every index they pass is in range; implementations are
/// free to panic otherwise.
pub trait VertexSource {
    /// Position of vertex `index`.
    fn vertex_position(&self, index: u32) -> Vec3;
}

impl VertexSource for [Vec3] {
    #[inline]
    fn vertex_position(&self, index: u32) -> Vec3 {
        self[index as usize]
    }
}

impl VertexSource for Vec<Vec3> {
    #[inline]
    fn vertex_position(&self, index: u32) -> Vec3 {
        self[index as usize]
    }
}

/// Indexed triangle mesh with cached per-triangle normals.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl VertexSource for TriangleMesh {
    #[inline]
    fn vertex_position(&self, index: u32) -> Vec3 {
        self.vertices[index as usize]
    }
}

impl TriangleMesh {
    /// Build a mesh from positions and a flat triangle index buffer.
    ///
    /// Normals are computed from the winding of each triangle.
    ///
    /// # Errors
    /// * `InvalidIndexBuffer` - `indices.len()` is not a multiple of 3
    /// * `IndexOutOfRange` - an index does not name a vertex
    pub fn from_indexed(vertices: Vec<Vec3>, indices: &[u32]) -> CoreResult<Self> {
        let faces: &[[u32; 3]] = bytemuck::try_cast_slice(indices)
            .map_err(|_| CoreError::InvalidIndexBuffer(indices.len()))?;

        let vertex_count = vertices.len();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(CoreError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        let triangles = faces
            .iter()
            .map(|&face| {
                let positions = face.map(|i| vertices[i as usize]);
                Triangle::with_normal_from(face, positions)
            })
            .collect::<Vec<_>>();

        debug!(
            vertices = vertex_count,
            triangles = triangles.len(),
            "Built triangle mesh"
        );

        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// All vertex positions.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Mutable vertex positions.
    ///
    /// Cached normals are not refreshed; call [`TriangleMesh::update_normals`]
    /// for the triangles that moved.
    pub fn vertices_mut(&mut self) -> &mut [Vec3] {
        &mut self.vertices
    }

    /// All triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Triangle at `index`, if any.
    pub fn triangle(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    /// Positions of a triangle's three corners.
    pub fn triangle_positions(&self, triangle: &Triangle) -> [Vec3; 3] {
        triangle.indices.map(|i| self.vertices[i as usize])
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Indices of every vertex, in order.
    pub fn vertex_indices(&self) -> Vec<u32> {
        (0..self.vertices.len() as u32).collect()
    }

    /// Bounding box of all vertices. `None` for an empty mesh.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Recompute the cached normals of the given triangles from their
    /// current vertex positions. Out-of-range triangle indices are skipped.
    pub fn update_normals(&mut self, triangle_indices: &[usize]) {
        for &t in triangle_indices {
            if let Some(tri) = self.triangles.get(t) {
                let normal = winding_normal(self.triangle_positions(tri));
                self.triangles[t].normal = normal;
            }
        }
    }

    /// Closest point on triangle `tri_index` to `point`.
    ///
    /// `None` if the triangle does not exist.
    pub fn closest_point(
        &self,
        tri_index: usize,
        point: Vec3,
        mode: NormalMode,
    ) -> Option<ClosestPoint> {
        let tri = self.triangles.get(tri_index)?;
        Some(closest_point_on_mesh_triangle(self, tri, point, mode))
    }
}
