//! Spatial Module
//!
//! Neighbor lookup over mesh vertices. A single uniform grid sized to the
//! brush radius; no hierarchy and no incremental updates.

pub mod grid;

pub use grid::{GRID_PADDING_RATIO, GridState, MAX_CELLS, SpatialGrid};
