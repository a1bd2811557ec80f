//! Config Tests - Loading, Saving and Validation
//!
//! Tests for `SculptCoreConfig` file handling and for grids built from it.

use std::path::PathBuf;

use clay_sculpt_engine::geometry::{Aabb, NormalMode};
use clay_sculpt_engine::{CoreError, GridSettings, SculptCoreConfig};
use glam::Vec3;

/// Per-test path in the system temp directory
fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "clay_sculpt_{}_{}.json",
        name,
        std::process::id()
    ))
}

// ============================================================================
// File Tests
// ============================================================================

/// A saved config loads back unchanged
#[test]
fn test_save_then_load() {
    let path = temp_config_path("save_then_load");
    let mut config = SculptCoreConfig::default();
    config.grid.cell_size = 0.35;
    config.closest_point.normal_mode = NormalMode::Raw;

    config.save(&path).unwrap();
    let loaded = SculptCoreConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, config);
}

/// The saved file is readable JSON with snake_case names
#[test]
fn test_saved_json_layout() {
    let path = temp_config_path("json_layout");
    SculptCoreConfig::default().save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["closest_point"]["normal_mode"], "oriented");
    assert!(value["grid"]["cell_size"].is_number());
}

/// Missing files report the path
#[test]
fn test_load_missing_file() {
    let path = temp_config_path("does_not_exist");
    let err = SculptCoreConfig::load(&path).unwrap_err();
    match err {
        CoreError::ConfigIo { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ConfigIo, got {other:?}"),
    }
}

/// Files with an unusable cell size are rejected on load
#[test]
fn test_load_rejects_invalid_cell_size() {
    let path = temp_config_path("zero_cell");
    std::fs::write(&path, r#"{ "grid": { "cell_size": 0.0 } }"#).unwrap();
    let err = SculptCoreConfig::load(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);

    assert!(matches!(err, CoreError::InvalidCellSize(_)));
}

/// An empty object is the default config
#[test]
fn test_empty_object_is_default() {
    let config = SculptCoreConfig::from_json_str("{}").unwrap();
    assert_eq!(config, SculptCoreConfig::default());
}

/// Unknown normal modes are parse errors
#[test]
fn test_unknown_normal_mode() {
    let err = SculptCoreConfig::from_json_str(r#"{ "closest_point": { "normal_mode": "flat" } }"#)
        .unwrap_err();
    assert!(matches!(err, CoreError::ConfigParse(_)));
}

// ============================================================================
// Grid Settings Tests
// ============================================================================

/// Grids built from settings use the configured cell size
#[test]
fn test_grid_for_uses_cell_size() {
    let settings = GridSettings { cell_size: 0.5 };
    let grid = settings
        .grid_for(&Aabb::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 1.0)))
        .unwrap();
    assert_eq!(grid.cell_size(), 0.5);
    // Padded extents 4.8, 2.4, 1.2
    assert_eq!(grid.dims(), [10, 5, 3]);
}

/// Invalid settings surface the grid error
#[test]
fn test_grid_for_rejects_negative_cell_size() {
    let settings = GridSettings { cell_size: -1.0 };
    let err = settings.grid_for(&Aabb::default()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidCellSize(_)));
}
