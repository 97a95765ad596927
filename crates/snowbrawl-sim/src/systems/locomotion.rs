//! Locomotion system: applies pending movement input relative to the
//! desired aim orientation and refreshes derived velocity.

use hecs::World;
use tracing::debug;

use snowbrawl_core::components::{AimState, CharacterMotor, InputState, MotionState, Player, Transform};
use snowbrawl_control::locomotion::try_move;

pub fn run(world: &mut World, dt: f32) {
    for (entity, (_, input, aim, motor, transform, motion)) in world.query_mut::<(
        &Player,
        &InputState,
        &AimState,
        &CharacterMotor,
        &mut Transform,
        &mut MotionState,
    )>() {
        let result = try_move(
            input.move_input,
            aim.desired_rotation,
            transform.position,
            motor.movement_speed,
            dt,
        );
        if result.moved {
            transform.position = result.new_position;
        } else if input.move_input != glam::Vec2::ZERO {
            debug!(entity = ?entity, "movement input produced no displacement");
        }
        motion.velocity = result.velocity;
    }
}
