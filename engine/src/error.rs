//! Error types for the sculpting core.
//!
//! Geometric degeneracy (parallel rays, zero-area triangles, boundary queries)
//! is never reported here; those cases resolve to sentinel values. These
//! errors cover caller configuration and malformed input buffers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by grid setup, mesh construction and config loading.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Grid cell size is zero, negative or not finite.
    #[error("Invalid grid cell size: {0} (must be finite and > 0)")]
    InvalidCellSize(f32),

    /// Grid would need more cells than the configured limit.
    #[error("Grid too large: {dims:?} = {cells} cells (limit {limit})")]
    GridTooLarge {
        /// Requested cell counts per axis.
        dims: [usize; 3],
        /// Total cell count.
        cells: usize,
        /// Maximum allowed cell count.
        limit: usize,
    },

    /// `build` was called before `init`.
    #[error("Grid has not been initialized")]
    NotInitialized,

    /// Index buffer length is not a multiple of three.
    #[error("Index buffer length {0} is not a multiple of 3")]
    InvalidIndexBuffer(usize),

    /// A triangle references a vertex that does not exist.
    #[error("Vertex index {index} out of range (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// IO error while reading or writing a config file.
    #[error("Failed to access config {path}: {source}")]
    ConfigIo {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Config JSON could not be parsed or written.
    #[error("Invalid config JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for sculpting core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
