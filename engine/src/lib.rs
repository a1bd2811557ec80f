//! Clay Sculpt Engine Library
//!
//! Geometric core of a mesh sculpting tool: the primitives a brush stroke
//! needs to find the surface under the cursor and the vertices inside the
//! brush. Rendering, undo and topology editing live elsewhere.
//!
//! # Modules
//!
//! - [`geometry`] - Intersection tests, closest point on a triangle, triangle metrics
//! - [`mesh`] - Vertex lookup trait and an indexed triangle mesh
//! - [`spatial`] - Uniform grid for vertex neighborhood queries
//! - [`camera`] - Screen/world projection and triangle picking
//! - [`config`] - Serializable grid and closest-point settings
//! - [`error`] - Error type for configuration and buffer validation
//!
//! # Example
//!
//! ```ignore
//! use clay_sculpt_engine::{SculptCoreConfig, TriangleMesh, pick_from_screen};
//! use clay_sculpt_engine::camera::{CameraTransforms, Viewport};
//!
//! let mut mesh = TriangleMesh::from_indexed(vertices, &indices)?;
//! let config = SculptCoreConfig::load("sculpt.json")?;
//!
//! // Grid sized to the brush, built over every vertex
//! let aabb = mesh.aabb().unwrap_or_default();
//! let mut grid = config.grid.grid_for(&aabb)?;
//! grid.build(&mesh, &mesh.vertex_indices())?;
//!
//! // Surface under the cursor, then the vertices around it
//! let camera = CameraTransforms::new(model_view, projection);
//! if let Some(hit) = pick_from_screen(&mesh, mouse, Viewport::new(w, h), &camera) {
//!     let candidates = grid.query_sphere(&mesh, hit.position, config.grid.cell_size);
//!     // ... displace candidates ...
//!     mesh.update_normals(&touched_triangles);
//! }
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod spatial;

// Re-export commonly used types at crate level
pub use camera::{CameraTransforms, TriangleHit, Viewport, pick_from_screen, pick_triangle};
pub use config::{ClosestPointSettings, GridSettings, SculptCoreConfig};
pub use error::{CoreError, CoreResult};
pub use geometry::{Aabb, ClosestPoint, NormalMode, Triangle};
pub use mesh::{TriangleMesh, VertexSource};
pub use spatial::{GridState, SpatialGrid};
