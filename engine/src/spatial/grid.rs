//! Uniform Spatial Grid
//!
//! Partitions a padded bounding box into cubic cells, each holding the vertex
//! indices that fall inside it. Brushes use it to answer "which vertices are
//! near this point" with a 3x3x3 cell lookup.
//!
//! ## Lifecycle
//! `Uninitialized -> Initialized -> Built`. [`SpatialGrid::init`] resets every
//! cell (also after a build). [`SpatialGrid::build`] appends indices and never
//! clears, so two builds without an `init` in between accumulate.
//!
//! ## Cell size
//! Pick the cell size to match the brush radius: the neighborhood then covers
//! every point within one cell size of the query, and its expected size does
//! not depend on mesh resolution. Very uneven point density is a poor fit.
//!
//! ## Clamping
//! `build` clamps the *linear* cell index into range, so a point outside the
//! padded box on one axis can land in an unrelated cell. `neighborhood` clamps
//! each axis independently. The two are not equivalent near corners.

use glam::Vec3;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::geometry::Aabb;
use crate::mesh::VertexSource;

/// Each side of the input box is pushed out by this fraction of its extent.
pub const GRID_PADDING_RATIO: f32 = 0.1;

/// Upper bound on the number of cells a grid may allocate.
pub const MAX_CELLS: usize = 1 << 24;

/// Lifecycle state of a [`SpatialGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GridState {
    /// No geometry yet
    #[default]
    Uninitialized,
    /// Bounds and cell size set, cells empty
    Initialized,
    /// At least one build has populated the cells
    Built,
}

/// Uniform grid of vertex indices.
///
/// The grid stores indices only. Positions are read through a
/// [`VertexSource`] during `build` and `query_sphere` and never kept.
#[derive(Clone, Debug, Default)]
pub struct SpatialGrid {
    state: GridState,
    /// Padded bounds
    bounds: Aabb,
    cell_size: f32,
    /// Cell counts along x, y, z
    dims: [usize; 3],
    cell_count: usize,
    /// Arena of per-cell index lists. May be longer than `cell_count` after a
    /// smaller re-init; only the first `cell_count` entries are live.
    cells: Vec<Vec<u32>>,
}

/// Cell count along one axis: `ceil(extent / cell_size)`, at least 1.
fn axis_cells(extent: f32, cell_size: f32) -> usize {
    // Saturating float-to-int cast: NaN becomes 0, huge values usize::MAX
    ((extent / cell_size).ceil() as usize).max(1)
}

impl SpatialGrid {
    /// Create an uninitialized grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid and initialize it in one step.
    pub fn with_bounds(aabb: &Aabb, cell_size: f32) -> CoreResult<Self> {
        let mut grid = Self::new();
        grid.init(aabb, cell_size)?;
        Ok(grid)
    }

    /// Set the grid geometry and empty every cell.
    ///
    /// `aabb` is padded by [`GRID_PADDING_RATIO`] of its extent on each side.
    /// Cell storage is reused when it is already large enough.
    ///
    /// # Errors
    /// * `InvalidCellSize` - `cell_size` is not finite or not positive
    /// * `GridTooLarge` - the cell count exceeds [`MAX_CELLS`]
    pub fn init(&mut self, aabb: &Aabb, cell_size: f32) -> CoreResult<()> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(CoreError::InvalidCellSize(cell_size));
        }

        let bounds = aabb.expanded_by_ratio(GRID_PADDING_RATIO);
        let extent = bounds.extent();
        let dims = [
            axis_cells(extent.x, cell_size),
            axis_cells(extent.y, cell_size),
            axis_cells(extent.z, cell_size),
        ];
        let cell_count = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(|| CoreError::GridTooLarge {
                dims,
                cells: dims.iter().fold(1usize, |acc, &d| acc.saturating_mul(d)),
                limit: MAX_CELLS,
            })?;

        if self.cells.len() < cell_count {
            self.cells.resize_with(cell_count, Vec::new);
        }
        for cell in &mut self.cells[..cell_count] {
            cell.clear();
        }

        self.bounds = bounds;
        self.cell_size = cell_size;
        self.dims = dims;
        self.cell_count = cell_count;
        self.state = GridState::Initialized;

        debug!(?dims, cell_count, cell_size, "Initialized spatial grid");
        Ok(())
    }

    /// Sort `indices` into cells using positions from `source`.
    ///
    /// Each position maps to `floor((p - bounds.min) / cell_size)` per axis;
    /// the resulting linear index is clamped into `[0, cell_count - 1]`.
    /// Existing cell contents are kept.
    ///
    /// # Errors
    /// * `NotInitialized` - `init` has never succeeded
    pub fn build<S>(&mut self, source: &S, indices: &[u32]) -> CoreResult<()>
    where
        S: VertexSource + ?Sized,
    {
        if self.state == GridState::Uninitialized {
            return Err(CoreError::NotInitialized);
        }

        let min = self.bounds.min;
        for &index in indices {
            let diff = source.vertex_position(index) - min;
            let slot = self.clamped_linear_index(
                (diff.x / self.cell_size).floor() as i64,
                (diff.y / self.cell_size).floor() as i64,
                (diff.z / self.cell_size).floor() as i64,
            );
            self.cells[slot].push(index);
        }

        self.state = GridState::Built;
        debug!(inserted = indices.len(), "Built spatial grid");
        Ok(())
    }

    /// Indices stored in the 3x3x3 block of cells around `point`.
    ///
    /// See [`SpatialGrid::neighborhood_into`].
    pub fn neighborhood(&self, point: Vec3) -> Vec<u32> {
        let mut out = Vec::new();
        self.neighborhood_into(point, &mut out);
        out
    }

    /// Clear `out` and fill it with the indices stored in the 3x3x3 block of
    /// cells around `point`.
    ///
    /// The center cell is found by clamping each axis into range, so points
    /// outside the bounds query the nearest boundary cell. The block is
    /// trimmed at the grid edges (no wraparound). Order is cell by cell
    /// (x outermost, z innermost) and then insertion order; nothing is
    /// sorted or deduplicated. An uninitialized grid yields nothing.
    pub fn neighborhood_into(&self, point: Vec3, out: &mut Vec<u32>) {
        out.clear();
        if self.state == GridState::Uninitialized {
            return;
        }

        let [cx, cy, cz] = self.cell_coord(point);
        let [dx, dy, dz] = self.dims;

        for x in cx.saturating_sub(1)..=(cx + 1).min(dx - 1) {
            for y in cy.saturating_sub(1)..=(cy + 1).min(dy - 1) {
                for z in cz.saturating_sub(1)..=(cz + 1).min(dz - 1) {
                    out.extend_from_slice(&self.cells[x + y * dx + z * dx * dy]);
                }
            }
        }
    }

    /// Neighborhood of `center` filtered to points within `radius`.
    ///
    /// Only the 3x3x3 block is searched, so the result is complete only when
    /// `radius <= cell_size`.
    pub fn query_sphere<S>(&self, source: &S, center: Vec3, radius: f32) -> Vec<u32>
    where
        S: VertexSource + ?Sized,
    {
        let radius_sq = radius * radius;
        let mut out = self.neighborhood(center);
        out.retain(|&i| (source.vertex_position(i) - center).length_squared() <= radius_sq);
        out
    }

    /// Cell coordinate of `point`, clamped per axis into the grid.
    pub fn cell_coord(&self, point: Vec3) -> [usize; 3] {
        let diff = point - self.bounds.min;
        let clamp_axis = |d: f32, dim: usize| -> usize {
            let c = (d / self.cell_size).floor();
            // Negative and NaN both go to the first cell
            if c >= 0.0 {
                (c as usize).min(dim.saturating_sub(1))
            } else {
                0
            }
        };
        [
            clamp_axis(diff.x, self.dims[0]),
            clamp_axis(diff.y, self.dims[1]),
            clamp_axis(diff.z, self.dims[2]),
        ]
    }

    /// `x + y * dim_x + z * dim_x * dim_y`, clamped into the live cell range.
    fn clamped_linear_index(&self, x: i64, y: i64, z: i64) -> usize {
        let dx = self.dims[0] as i64;
        let dxy = dx * self.dims[1] as i64;
        let linear = x
            .saturating_add(y.saturating_mul(dx))
            .saturating_add(z.saturating_mul(dxy));
        linear.clamp(0, self.cell_count as i64 - 1) as usize
    }

    /// Lifecycle state.
    pub fn state(&self) -> GridState {
        self.state
    }

    /// Padded bounds.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Edge length of a cell.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell counts along x, y, z.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Total number of live cells.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Contents of the cell at a linear index.
    pub fn cell(&self, linear: usize) -> Option<&[u32]> {
        if linear < self.cell_count {
            Some(&self.cells[linear])
        } else {
            None
        }
    }
}
