//! Snapshot assembly: collects the visible state of the world into a
//! serializable structure after each tick.

use hecs::World;

use snowbrawl_core::components::{AimState, InputState, MotionState, Player, Transform};
use snowbrawl_core::events::GameEvent;
use snowbrawl_core::state::{GameStateSnapshot, PlayerView, ProjectileView};
use snowbrawl_core::types::SimTime;

use crate::components::{body_id, AttachedTo, Projectile, Thrower};

pub fn build(world: &World, time: SimTime, events: Vec<GameEvent>) -> GameStateSnapshot {
    let mut player = PlayerView::default();
    for (entity, (_, transform, input, aim, motion)) in world
        .query::<(&Player, &Transform, &InputState, &AimState, &MotionState)>()
        .iter()
    {
        player = PlayerView {
            id: body_id(entity),
            position: transform.position,
            rotation: transform.rotation,
            velocity: motion.velocity,
            aiming: input.aim_held,
            aim_point: aim.aim_point,
            throw_phase: world
                .get::<&Thrower>(entity)
                .map(|thrower| thrower.fsm.phase())
                .unwrap_or_default(),
            charge_secs: input.charge_secs,
        };
        break;
    }

    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Transform)>()
        .iter()
        .map(|(entity, (projectile, transform))| ProjectileView {
            id: body_id(entity),
            position: transform.position,
            launched: projectile.launched,
            attached: world.get::<&AttachedTo>(entity).is_ok(),
            owner: projectile.owner.map(body_id),
        })
        .collect();
    // Stable ordering keeps snapshots byte-comparable across runs.
    projectiles.sort_by_key(|view| view.id.0);

    GameStateSnapshot {
        time,
        player,
        projectiles,
        events,
    }
}
