//! Velocity-integrated locomotion relative to the aim orientation.

use glam::{Quat, Vec2, Vec3};

/// Result of a movement attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub new_position: Vec3,
    /// Position delta divided by elapsed time (m/s).
    pub velocity: Vec3,
    pub moved: bool,
}

/// Integrate one tick of movement.
///
/// The 2D input is mapped onto the horizontal plane relative to
/// `orientation` (x = strafe, y = forward), not raw world axes. Zero input
/// leaves the position unchanged and reports `moved = false`. `moved` can
/// also be false with nonzero input when `speed` is zero. The caller's
/// timing contract guarantees `dt > 0`.
pub fn try_move(
    pending_input: Vec2,
    orientation: Quat,
    position: Vec3,
    speed: f32,
    dt: f32,
) -> MoveResult {
    if pending_input.length_squared() <= 0.0 {
        return MoveResult {
            new_position: position,
            velocity: Vec3::ZERO,
            moved: false,
        };
    }

    let movement = orientation * Vec3::new(pending_input.x, 0.0, pending_input.y);
    let new_position = position + movement * speed * dt;
    let velocity = (new_position - position) / dt;

    MoveResult {
        new_position,
        velocity,
        moved: velocity.length_squared() > 0.0,
    }
}
