//! Camera seam for aim projection.
//!
//! The viewing camera belongs to the rendering layer; the core only needs
//! one thing from it: a world-space ray through a screen point.

use glam::{Vec2, Vec3};

use snowbrawl_core::types::Ray;

/// Maps a screen-space pointer position to a world-space ray.
pub trait ScreenRayCaster: Send {
    fn pointer_ray(&self, pointer: Vec2) -> Ray;
}

/// Top-down orthographic camera: screen x/y map linearly onto world x/z and
/// rays point straight down. The default view for headless runs and tests;
/// a pointer at (5, 5) with unit scale projects onto the ground at
/// (5, 0, 5).
#[derive(Debug, Clone, Copy)]
pub struct OverheadCamera {
    /// Camera height above the ground plane.
    pub height: f32,
    /// World units per screen unit.
    pub units_per_pixel: f32,
}

impl Default for OverheadCamera {
    fn default() -> Self {
        Self {
            height: 20.0,
            units_per_pixel: 1.0,
        }
    }
}

impl ScreenRayCaster for OverheadCamera {
    fn pointer_ray(&self, pointer: Vec2) -> Ray {
        let origin = Vec3::new(
            pointer.x * self.units_per_pixel,
            self.height,
            pointer.y * self.units_per_pixel,
        );
        Ray::new(origin, -Vec3::Y)
    }
}
