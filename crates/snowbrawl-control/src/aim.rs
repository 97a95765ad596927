//! Aim projection and orientation tracking.
//!
//! Maps a pointer ray to a world aim point via ray/plane intersection and
//! derives a desired look-at rotation. Degenerate geometry never errors:
//! a parallel ray falls back to a point ahead of the entity, and a
//! zero-length direction retains the previous orientation.

use glam::{Mat3, Quat, Vec3};

use snowbrawl_core::constants::AIM_FALLBACK_DISTANCE;
use snowbrawl_core::types::{Plane, Ray};

/// Resolve the world aim point for a pointer ray.
///
/// The projection plane is horizontal (world-up normal) through
/// `entity_position`, so aiming keeps working if vertical movement is ever
/// added. When the ray never meets the plane, the aim point defaults to
/// `AIM_FALLBACK_DISTANCE` meters ahead along `entity_forward`.
pub fn resolve_aim_point(ray: &Ray, entity_position: Vec3, entity_forward: Vec3) -> Vec3 {
    let plane = Plane::from_point_normal(entity_position, Vec3::Y);
    match plane.raycast(ray) {
        Some(t) => ray.point_at(t),
        None => entity_position + entity_forward * AIM_FALLBACK_DISTANCE,
    }
}

/// Look-at rotation mapping +Z onto `forward` with world-up as the up
/// reference. Returns `None` when `forward` is near zero or parallel to
/// world-up, where the rotation would be undefined.
pub fn look_rotation(forward: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = Vec3::Y.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

/// Desired orientation toward `aim_point` from `entity_position`.
/// Falls back to `previous` when the direction is degenerate.
pub fn desired_rotation(aim_point: Vec3, entity_position: Vec3, previous: Quat) -> Quat {
    look_rotation(aim_point - entity_position).unwrap_or(previous)
}

/// Advance `current` toward `desired` at `rotation_speed_deg` degrees per
/// second. The interpolation parameter is clamped so a long frame can never
/// overshoot, giving bounded per-tick rotation regardless of frame
/// duration.
pub fn rotate_toward(current: Quat, desired: Quat, rotation_speed_deg: f32, dt: f32) -> Quat {
    let t = (dt * rotation_speed_deg.to_radians()).clamp(0.0, 1.0);
    current.slerp(desired, t).normalize()
}
