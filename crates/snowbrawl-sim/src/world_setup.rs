//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player character (with its projectile anchor) and static
//! obstacle bodies with appropriate component bundles, registering every
//! collidable body with the physics substrate.

use glam::{Quat, Vec3};
use hecs::World;

use snowbrawl_core::components::*;
use snowbrawl_core::config::CharacterPreset;

use crate::components::{body_id, AttachedTo, Thrower};
use crate::substrate::PhysicsSubstrate;

/// Spawn the player character at the origin, facing +Z, with its projectile
/// anchor attached at the preset's offset. Returns the player entity.
pub fn spawn_player(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    preset: &CharacterPreset,
) -> hecs::Entity {
    let motor = CharacterMotor {
        movement_speed: preset.movement_speed,
        rotation_speed_deg: preset.rotation_speed_deg,
    };

    let player = world.spawn((
        Player,
        Transform::default(),
        InputState::default(),
        AimState::default(),
        MotionState::default(),
        motor,
        RigidState::active(),
    ));
    substrate.register_body(body_id(player), false, true);

    let anchor = world.spawn((
        Transform::from_position(preset.anchor_offset),
        AttachedTo {
            parent: player,
            local_offset: preset.anchor_offset,
            local_rotation: Quat::IDENTITY,
        },
    ));

    let _ = world.insert_one(player, Thrower::from_preset(preset, anchor));

    player
}

/// Spawn a static collidable obstacle.
pub fn spawn_obstacle(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    position: Vec3,
) -> hecs::Entity {
    let obstacle = world.spawn((Obstacle, Transform::from_position(position), RigidState::active()));
    substrate.register_body(body_id(obstacle), false, true);
    obstacle
}
