//! ECS components for player-controlled entities and collidable bodies.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in the control and simulation crates.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// World pose. Y is up; +Z is forward at identity rotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// The entity's forward direction (+Z rotated by the current rotation).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Latched input as delivered by the external input source, with
/// latest-value semantics. Previous-tick copies support edge detection;
/// the engine refreshes them at the end of each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Pending 2D movement vector, consumed once per tick.
    pub move_input: Vec2,
    /// Last pointer position in screen coordinates.
    pub pointer: Vec2,
    pub aim_held: bool,
    pub aim_was_held: bool,
    pub fire_held: bool,
    pub fire_was_held: bool,
    /// Seconds fire has been continuously held while charging a throw.
    /// The input loop owns this stopwatch, not the throw state machine.
    pub charge_secs: f32,
}

impl InputState {
    pub fn fire_pressed(&self) -> bool {
        self.fire_held && !self.fire_was_held
    }

    pub fn fire_released(&self) -> bool {
        !self.fire_held && self.fire_was_held
    }

    pub fn aim_toggled(&self) -> bool {
        self.aim_held != self.aim_was_held
    }
}

/// Aim tracking state. Recomputed every tick while aiming is held,
/// frozen at the last value otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AimState {
    /// Last resolved world aim point (pointer ray projected on the ground
    /// plane, or the forward fallback).
    pub aim_point: Vec3,
    /// Desired look-at rotation toward the aim point. Always a unit
    /// rotation; degenerate directions retain the previous value.
    pub desired_rotation: Quat,
}

impl Default for AimState {
    fn default() -> Self {
        Self {
            aim_point: Vec3::ZERO,
            desired_rotation: Quat::IDENTITY,
        }
    }
}

/// Derived motion state. `velocity` is recomputed each tick from the
/// position delta over elapsed time, never set directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MotionState {
    pub velocity: Vec3,
}

/// Movement tuning for a controllable character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CharacterMotor {
    /// Movement speed in m/s.
    pub movement_speed: f32,
    /// Rotation speed in degrees/s.
    pub rotation_speed_deg: f32,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            movement_speed: crate::constants::DEFAULT_MOVEMENT_SPEED,
            rotation_speed_deg: crate::constants::DEFAULT_ROTATION_SPEED_DEG,
        }
    }
}

/// The core's bookkeeping mirror of the physics substrate's body flags.
/// A held projectile is kinematic with its collider disabled; launch flips
/// both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidState {
    pub kinematic: bool,
    pub collider_enabled: bool,
}

impl RigidState {
    /// Flags for a body that collides and is simulated (characters,
    /// obstacles).
    pub fn active() -> Self {
        Self {
            kinematic: false,
            collider_enabled: true,
        }
    }

    /// Flags for a freshly created, held projectile: purely decorative
    /// until launch.
    pub fn held() -> Self {
        Self {
            kinematic: true,
            collider_enabled: false,
        }
    }
}

/// Marks an entity as a controllable character. Collision outcomes classify
/// a hit as an entity hit when the struck body carries this marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a static collidable body in the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;
