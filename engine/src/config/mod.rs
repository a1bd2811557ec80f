//! Config Module
//!
//! Tunable parameters for the sculpting core, loadable from JSON.

pub mod core_config;

pub use core_config::{ClosestPointSettings, GridSettings, SculptCoreConfig};
