//! Sculpting Core Configuration
//!
//! Grid cell size and closest-point normal handling in one serde struct, so a
//! tool can persist its brush setup next to the document. Missing fields in a
//! JSON file take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::geometry::{Aabb, NormalMode};
use crate::spatial::SpatialGrid;

/// Spatial grid parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Edge length of a grid cell in world units. Match it to the brush radius.
    pub cell_size: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self { cell_size: 0.1 }
    }
}

impl GridSettings {
    /// Grid initialized over `aabb` with this cell size.
    pub fn grid_for(&self, aabb: &Aabb) -> CoreResult<SpatialGrid> {
        SpatialGrid::with_bounds(aabb, self.cell_size)
    }
}

/// Closest-point query parameters.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosestPointSettings {
    /// How output normals are derived
    pub normal_mode: NormalMode,
}

/// Top-level configuration of the sculpting core.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptCoreConfig {
    /// Spatial grid
    pub grid: GridSettings,
    /// Closest-point queries
    pub closest_point: ClosestPointSettings,
}

impl SculptCoreConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), cell_size = config.grid.cell_size, "Loaded sculpt config");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| CoreError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check values that would make the grid unusable.
    pub fn validate(&self) -> CoreResult<()> {
        let cell_size = self.grid.cell_size;
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(CoreError::InvalidCellSize(cell_size));
        }
        Ok(())
    }
}
