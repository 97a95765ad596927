//! Throw system: drives the creation timer, charge stopwatch, and the
//! fire-input edges, and performs the world-side work of creating,
//! launching, and discarding projectiles.
//!
//! The legality of every transition is gated by the thrower's state
//! machine; this module owns the preconditions that live in the world
//! (anchor and template configured, owner collider present) and the
//! physics-substrate side effects.

use hecs::{Entity, World};
use tracing::{debug, warn};

use snowbrawl_core::components::{InputState, RigidState, Transform};
use snowbrawl_core::enums::ThrowPhase;
use snowbrawl_core::events::GameEvent;
use snowbrawl_control::throw::{solve_throw, CreationProgress};

use crate::components::{body_id, AttachedTo, CollisionExclusions, InstanceHitListener, Projectile, Thrower};
use crate::substrate::PhysicsSubstrate;

pub fn run(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    events: &mut Vec<GameEvent>,
    dt: f32,
) {
    let throwers: Vec<Entity> = world
        .query::<&Thrower>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in throwers {
        advance_creation(world, events, entity, dt);

        let input = match world.get::<&InputState>(entity) {
            Ok(input) => *input,
            Err(_) => continue,
        };

        if input.fire_pressed() {
            handle_fire_pressed(world, substrate, events, entity);
        }
        accumulate_charge(world, entity, dt);
        if input.fire_released() {
            handle_fire_released(world, substrate, events, entity);
        }
    }
}

fn advance_creation(world: &mut World, events: &mut Vec<GameEvent>, entity: Entity, dt: f32) {
    if let Ok(mut thrower) = world.get::<&mut Thrower>(entity) {
        if thrower.fsm.creation_tick(dt) == CreationProgress::BecameReady {
            thrower.creation = None;
            events.push(GameEvent::CreationEnded {
                thrower: body_id(entity),
                success: true,
            });
            debug!(thrower = ?entity, "projectile ready");
        }
    }
}

fn accumulate_charge(world: &mut World, entity: Entity, dt: f32) {
    let charging = world
        .get::<&Thrower>(entity)
        .map(|t| t.fsm.phase() == ThrowPhase::Charging)
        .unwrap_or(false);
    if !charging {
        return;
    }
    if let Ok(mut input) = world.get::<&mut InputState>(entity) {
        if input.fire_held {
            input.charge_secs += dt;
        }
    }
}

fn handle_fire_pressed(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    events: &mut Vec<GameEvent>,
    entity: Entity,
) {
    let phase = match world.get::<&Thrower>(entity) {
        Ok(thrower) => thrower.fsm.phase(),
        Err(_) => return,
    };
    match phase {
        ThrowPhase::Idle => {
            create_projectile(world, substrate, events, entity);
        }
        ThrowPhase::Ready => {
            if let Ok(mut thrower) = world.get::<&mut Thrower>(entity) {
                thrower.fsm.begin_charge();
            }
            if let Ok(mut input) = world.get::<&mut InputState>(entity) {
                input.charge_secs = 0.0;
            }
        }
        ThrowPhase::Creating => {
            debug!(thrower = ?entity, "projectile is still being created");
        }
        ThrowPhase::Charging | ThrowPhase::Thrown => {}
    }
}

fn handle_fire_released(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    events: &mut Vec<GameEvent>,
    entity: Entity,
) {
    let charging = world
        .get::<&Thrower>(entity)
        .map(|t| t.fsm.phase() == ThrowPhase::Charging)
        .unwrap_or(false);
    if !charging {
        return;
    }
    let held_secs = world
        .get::<&InputState>(entity)
        .map(|input| input.charge_secs)
        .unwrap_or(0.0);
    if !throw_projectile(world, substrate, events, entity, held_secs) {
        warn!(thrower = ?entity, "throw failed on fire release");
    }
    if let Ok(mut input) = world.get::<&mut InputState>(entity) {
        input.charge_secs = 0.0;
    }
}

/// Create a new held projectile at the thrower's anchor and start the
/// creation timer. Returns false when the thrower is mid-lifecycle or
/// misconfigured.
pub fn create_projectile(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    events: &mut Vec<GameEvent>,
    thrower_entity: Entity,
) -> bool {
    let anchor = {
        let thrower = match world.get::<&Thrower>(thrower_entity) {
            Ok(thrower) => thrower,
            Err(_) => return false,
        };
        let anchor = match thrower.anchor {
            Some(anchor) => anchor,
            None => {
                warn!(thrower = ?thrower_entity, "no projectile anchor configured");
                return false;
            }
        };
        if thrower.template.is_none() {
            warn!(thrower = ?thrower_entity, "no projectile template configured");
            return false;
        }
        if thrower.fsm.phase() != ThrowPhase::Idle {
            debug!(thrower = ?thrower_entity, phase = ?thrower.fsm.phase(), "already holding a projectile");
            return false;
        }
        anchor
    };

    let spawn_pose = world
        .get::<&Transform>(anchor)
        .map(|t| *t)
        .unwrap_or_default();

    let projectile = world.spawn((
        spawn_pose,
        Projectile {
            owner: Some(thrower_entity),
            launched: false,
        },
        RigidState::held(),
        AttachedTo {
            parent: anchor,
            local_offset: glam::Vec3::ZERO,
            local_rotation: glam::Quat::IDENTITY,
        },
    ));
    substrate.register_body(body_id(projectile), true, false);

    // The owner must be a collidable body, or the exclusion pair that
    // prevents instant self-hits cannot be formed.
    if world.get::<&RigidState>(thrower_entity).is_err() {
        substrate.release_body(body_id(projectile));
        let _ = world.despawn(projectile);
        warn!(thrower = ?thrower_entity, "thrower has no rigid state, discarding projectile");
        return false;
    }
    let _ = world.insert_one(
        projectile,
        CollisionExclusions {
            bodies: vec![thrower_entity],
        },
    );
    substrate.add_exclusion(body_id(projectile), body_id(thrower_entity));

    let thrower_ok = match world.get::<&mut Thrower>(thrower_entity) {
        Ok(mut thrower) => {
            thrower.creation = thrower.fsm.begin_creation();
            thrower.projectile = Some(projectile);
            true
        }
        Err(_) => false,
    };
    if !thrower_ok {
        substrate.release_body(body_id(projectile));
        let _ = world.despawn(projectile);
        return false;
    }
    events.push(GameEvent::CreationStarted {
        thrower: body_id(thrower_entity),
    });
    true
}

/// Launch the held projectile along the thrower's facing with a force
/// scaled by `held_secs`. Returns false when no throwable projectile is
/// held.
pub fn throw_projectile(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    events: &mut Vec<GameEvent>,
    thrower_entity: Entity,
    held_secs: f32,
) -> bool {
    let (projectile, tuning, kind_multiplier, listener) = {
        let thrower = match world.get::<&Thrower>(thrower_entity) {
            Ok(thrower) => thrower,
            Err(_) => return false,
        };
        let projectile = match thrower.projectile {
            Some(projectile) => projectile,
            None => {
                debug!(thrower = ?thrower_entity, "no projectile to throw");
                return false;
            }
        };
        if !thrower.fsm.ready_to_throw() {
            debug!(thrower = ?thrower_entity, phase = ?thrower.fsm.phase(), "projectile not ready to throw");
            return false;
        }
        let kind_multiplier = thrower
            .template
            .as_ref()
            .map(|kind| kind.force_multiplier)
            .unwrap_or(1.0);
        (projectile, thrower.tuning, kind_multiplier, thrower.hit_listener.clone())
    };

    let (origin, direction) = match world.get::<&Transform>(thrower_entity) {
        Ok(transform) => (transform.position, transform.forward()),
        Err(_) => return false,
    };
    let solution = solve_throw(direction, held_secs, &tuning, kind_multiplier);

    let _ = world.remove_one::<AttachedTo>(projectile);
    if let Ok(mut body) = world.get::<&mut Projectile>(projectile) {
        body.launched = true;
    }
    if let Ok(mut rigid) = world.get::<&mut RigidState>(projectile) {
        rigid.kinematic = false;
        rigid.collider_enabled = true;
    }
    substrate.set_kinematic(body_id(projectile), false);
    substrate.apply_impulse(body_id(projectile), direction * solution.force);
    substrate.set_collider_enabled(body_id(projectile), true);

    if let Some(listener) = listener {
        let _ = world.insert_one(projectile, InstanceHitListener(listener));
    }

    events.push(GameEvent::ProjectileThrown {
        thrower: body_id(thrower_entity),
        projectile: body_id(projectile),
        origin,
        direction: solution.launch_direction,
    });

    if let Ok(mut thrower) = world.get::<&mut Thrower>(thrower_entity) {
        thrower.fsm.throw();
        thrower.projectile = None;
    }
    true
}

/// Cancel an in-progress creation and discard the half-made projectile.
/// Idempotent: returns false once the creation has finished or was already
/// cancelled.
pub fn interrupt_creation(
    world: &mut World,
    substrate: &mut dyn PhysicsSubstrate,
    events: &mut Vec<GameEvent>,
    thrower_entity: Entity,
) -> bool {
    let projectile = {
        let mut thrower = match world.get::<&mut Thrower>(thrower_entity) {
            Ok(thrower) => thrower,
            Err(_) => return false,
        };
        let token = match thrower.creation {
            Some(token) => token,
            None => return false,
        };
        if !thrower.fsm.interrupt(token) {
            return false;
        }
        thrower.creation = None;
        thrower.projectile.take()
    };

    if let Some(projectile) = projectile {
        substrate.release_body(body_id(projectile));
        let _ = world.despawn(projectile);
    }
    events.push(GameEvent::CreationEnded {
        thrower: body_id(thrower_entity),
        success: false,
    });
    debug!(thrower = ?thrower_entity, "creation interrupted");
    true
}
