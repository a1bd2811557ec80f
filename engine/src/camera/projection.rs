//! Projection Module
//!
//! Converts between screen space (pixels plus depth) and world space for a
//! camera described by its model-view and projection matrices.
//!
//! Screen coordinates have their origin at the top-left corner with y going
//! down, like mouse positions. Depth is the window depth in `[0, 1]`
//! (0 = near plane, 1 = far plane). The matrix pipeline runs in f64.

use glam::{DMat4, DVec4, Mat4, Vec2, Vec3};

/// Viewport size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Camera transforms supplied by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransforms {
    /// World (or model) to eye space
    pub model_view: Mat4,
    /// Eye to clip space
    pub projection: Mat4,
}

impl CameraTransforms {
    /// Create transforms from the two matrices.
    pub fn new(model_view: Mat4, projection: Mat4) -> Self {
        Self {
            model_view,
            projection,
        }
    }

    /// Right-handed look-at camera with an OpenGL-style perspective.
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            model_view: Mat4::look_at_rh(eye, target, up),
            projection: Mat4::perspective_rh_gl(fov_y, aspect, near, far),
        }
    }

    fn view_projection(&self) -> DMat4 {
        self.projection.as_dmat4() * self.model_view.as_dmat4()
    }
}

/// A world-space segment through a screen point, from the near plane to the
/// far plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRay {
    /// Point on the near plane (depth 0)
    pub near: Vec3,
    /// Point on the far plane (depth 1)
    pub far: Vec3,
}

impl ScreenRay {
    /// Unit direction from `near` to `far`.
    pub fn direction(&self) -> Vec3 {
        (self.far - self.near).normalize_or_zero()
    }
}

/// A world point projected to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// Pixel position, origin top-left, y down
    pub position: Vec2,
    /// Window depth, 0 at the near plane and 1 at the far plane
    pub depth: f32,
}

/// World position of the screen point `screen` at window depth `depth`.
///
/// # Returns
/// * `None` - The combined matrix is singular or the point maps to infinity
pub fn unproject_screen_to_world_at_depth(
    screen: Vec2,
    depth: f32,
    viewport: Viewport,
    camera: &CameraTransforms,
) -> Option<Vec3> {
    let inverse = checked_inverse(camera.view_projection())?;

    // Flip y: screen origin is top-left, GL window origin bottom-left
    let ndc = DVec4::new(
        2.0 * screen.x as f64 / viewport.width as f64 - 1.0,
        2.0 * (viewport.height - screen.y) as f64 / viewport.height as f64 - 1.0,
        2.0 * depth as f64 - 1.0,
        1.0,
    );
    let world = inverse * ndc;
    if world.w == 0.0 || !world.is_finite() {
        return None;
    }
    Some((world.truncate() / world.w).as_vec3())
}

/// Segment through `screen` from the near plane to the far plane.
pub fn unproject_screen_ray(
    screen: Vec2,
    viewport: Viewport,
    camera: &CameraTransforms,
) -> Option<ScreenRay> {
    Some(ScreenRay {
        near: unproject_screen_to_world_at_depth(screen, 0.0, viewport, camera)?,
        far: unproject_screen_to_world_at_depth(screen, 1.0, viewport, camera)?,
    })
}

/// Screen position and window depth of `world`.
///
/// # Returns
/// * `None` - The point has clip-space w of zero (it lies on the eye plane)
pub fn project_world_to_screen(
    world: Vec3,
    viewport: Viewport,
    camera: &CameraTransforms,
) -> Option<ScreenPoint> {
    let clip = camera.view_projection() * world.as_dvec3().extend(1.0);
    if clip.w == 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;

    let x = (ndc.x + 1.0) * 0.5 * viewport.width as f64;
    let y = (ndc.y + 1.0) * 0.5 * viewport.height as f64;
    Some(ScreenPoint {
        position: Vec2::new(x as f32, viewport.height - y as f32),
        depth: ((ndc.z + 1.0) * 0.5) as f32,
    })
}

/// Unit world-space vector, parallel to the near plane, pointing from the
/// world position under `old` to the one under `new`.
///
/// Returns the zero vector when the two positions coincide or the camera
/// cannot be inverted.
pub fn screen_space_delta(
    old: Vec2,
    new: Vec2,
    viewport: Viewport,
    camera: &CameraTransforms,
) -> Vec3 {
    let from = unproject_screen_to_world_at_depth(old, 0.0, viewport, camera);
    let to = unproject_screen_to_world_at_depth(new, 0.0, viewport, camera);
    match (from, to) {
        (Some(from), Some(to)) => (to - from).normalize_or_zero(),
        _ => Vec3::ZERO,
    }
}

/// Map a pixel position to `[-1, 1]` on both axes, y up.
pub fn normalized_mouse(screen: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        2.0 * screen.x / viewport.width - 1.0,
        1.0 - 2.0 * screen.y / viewport.height,
    )
}

/// Arcball projection of a normalized mouse position onto the unit sphere.
///
/// Points outside the unit disc are pushed onto the sphere's silhouette
/// (z = 0) and normalized.
pub fn mouse_on_unit_sphere(ndc: Vec2) -> Vec3 {
    let z_sq = 1.0 - ndc.x * ndc.x - ndc.y * ndc.y;
    let z = if z_sq > 0.0 { z_sq.sqrt() } else { 0.0 };
    Vec3::new(ndc.x, ndc.y, z).normalize_or_zero()
}

fn checked_inverse(m: DMat4) -> Option<DMat4> {
    let det = m.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    Some(m.inverse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_camera() -> CameraTransforms {
        CameraTransforms::look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            std::f32::consts::FRAC_PI_2,
            1.0,
            1.0,
            100.0,
        )
    }

    #[test]
    fn test_screen_center_unprojects_onto_view_axis() {
        let viewport = Viewport::new(800.0, 800.0);
        let ray = unproject_screen_ray(Vec2::new(400.0, 400.0), viewport, &test_camera()).unwrap();
        assert_relative_eq!(ray.near.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ray.near.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ray.near.z, 4.0, epsilon = 1e-4);
        assert_relative_eq!(ray.far.z, -95.0, epsilon = 1e-2);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_project_then_unproject() {
        let viewport = Viewport::new(1024.0, 768.0);
        let camera = CameraTransforms::look_at(
            Vec3::new(3.0, 2.0, 6.0),
            Vec3::ZERO,
            Vec3::Y,
            1.0,
            viewport.aspect_ratio(),
            0.1,
            50.0,
        );
        let world = Vec3::new(0.5, -0.25, 1.0);
        let screen = project_world_to_screen(world, viewport, &camera).unwrap();
        assert!(screen.depth > 0.0 && screen.depth < 1.0);

        let back =
            unproject_screen_to_world_at_depth(screen.position, screen.depth, viewport, &camera)
                .unwrap();
        assert!((back - world).length() < 1e-3, "got {back:?}");
    }

    #[test]
    fn test_top_of_screen_is_up() {
        let viewport = Viewport::new(800.0, 800.0);
        let p = unproject_screen_to_world_at_depth(
            Vec2::new(400.0, 0.0),
            0.0,
            viewport,
            &test_camera(),
        )
        .unwrap();
        assert!(p.y > 0.0);
    }

    #[test]
    fn test_singular_camera() {
        let camera = CameraTransforms::new(Mat4::ZERO, Mat4::IDENTITY);
        let viewport = Viewport::default();
        assert!(unproject_screen_ray(Vec2::ZERO, viewport, &camera).is_none());
        assert_eq!(
            screen_space_delta(Vec2::ZERO, Vec2::ONE, viewport, &camera),
            Vec3::ZERO
        );
    }

    #[test]
    fn test_screen_space_delta_moves_right() {
        let viewport = Viewport::new(800.0, 800.0);
        let delta = screen_space_delta(
            Vec2::new(400.0, 400.0),
            Vec2::new(500.0, 400.0),
            viewport,
            &test_camera(),
        );
        assert!((delta - Vec3::X).length() < 1e-4);
        assert_eq!(
            screen_space_delta(Vec2::ONE, Vec2::ONE, viewport, &test_camera()),
            Vec3::ZERO
        );
    }

    #[test]
    fn test_normalized_mouse() {
        let viewport = Viewport::new(200.0, 100.0);
        assert_eq!(normalized_mouse(Vec2::new(0.0, 0.0), viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(normalized_mouse(Vec2::new(200.0, 100.0), viewport), Vec2::new(1.0, -1.0));
        assert_eq!(normalized_mouse(Vec2::new(100.0, 50.0), viewport), Vec2::ZERO);
    }

    #[test]
    fn test_mouse_on_unit_sphere() {
        assert_eq!(mouse_on_unit_sphere(Vec2::ZERO), Vec3::Z);

        let p = mouse_on_unit_sphere(Vec2::new(0.6, 0.0));
        assert_relative_eq!(p.z, 0.8, epsilon = 1e-6);

        // Outside the disc: on the silhouette
        let p = mouse_on_unit_sphere(Vec2::new(3.0, 4.0));
        assert_eq!(p.z, 0.0);
        assert_relative_eq!(p.length(), 1.0, epsilon = 1e-6);
    }
}
