//! Camera Module
//!
//! Screen/world projection helpers and triangle picking.
//! This module is window-system agnostic - it only consumes the camera
//! matrices the renderer already has.

pub mod projection;
pub mod raycast;

pub use projection::{
    CameraTransforms, ScreenPoint, ScreenRay, Viewport, mouse_on_unit_sphere, normalized_mouse,
    project_world_to_screen, screen_space_delta, unproject_screen_ray,
    unproject_screen_to_world_at_depth,
};
pub use raycast::{TriangleHit, pick_from_screen, pick_triangle, segment_hits_any};
