//! Aim system: projects the pointer onto the ground plane and turns the
//! character toward the result.
//!
//! Runs only while the aim input is held; releasing aim freezes both the
//! aim point and the desired rotation at their last values.

use hecs::World;

use snowbrawl_core::components::{AimState, CharacterMotor, InputState, Player, Transform};
use snowbrawl_core::events::GameEvent;
use snowbrawl_control::aim::{desired_rotation, resolve_aim_point, rotate_toward};

use crate::components::body_id;
use crate::view::ScreenRayCaster;

pub fn run(
    world: &mut World,
    camera: &dyn ScreenRayCaster,
    events: &mut Vec<GameEvent>,
    dt: f32,
) {
    for (entity, (_, input, aim, motor, transform)) in world.query_mut::<(
        &Player,
        &InputState,
        &mut AimState,
        &CharacterMotor,
        &mut Transform,
    )>() {
        if input.aim_toggled() {
            events.push(GameEvent::AimingChanged {
                entity: body_id(entity),
                active: input.aim_held,
            });
        }
        if !input.aim_held {
            continue;
        }

        let ray = camera.pointer_ray(input.pointer);
        aim.aim_point = resolve_aim_point(&ray, transform.position, transform.forward());
        aim.desired_rotation =
            desired_rotation(aim.aim_point, transform.position, aim.desired_rotation);
        transform.rotation = rotate_toward(
            transform.rotation,
            aim.desired_rotation,
            motor.rotation_speed_deg,
            dt,
        );
    }
}
