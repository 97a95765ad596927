//! The simulation engine: owns the world, drains queued commands at tick
//! boundaries, runs the systems in a fixed order, and produces a snapshot
//! per tick.
//!
//! External collaborators plug in at two seams: the physics substrate
//! receives body commands and reports collisions back through
//! `report_collision`, and the screen-ray caster maps pointer positions to
//! world rays for aiming.

use std::collections::VecDeque;
use std::mem;

use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use snowbrawl_core::commands::PlayerCommand;
use snowbrawl_core::components::{InputState, Player, RigidState};
use snowbrawl_core::config::CharacterPreset;
use snowbrawl_core::events::{GameEvent, HitOutcome};
use snowbrawl_core::state::GameStateSnapshot;
use snowbrawl_core::types::{BodyId, SimTime};

use crate::components::{body_id, entity_of, CollisionExclusions, InstanceHitListener, Projectile};
use crate::events::{EventHub, EventListener, SubscriberId};
use crate::substrate::{HeadlessSubstrate, PhysicsSubstrate};
use crate::systems;
use crate::view::{OverheadCamera, ScreenRayCaster};
use crate::world_setup;

/// Engine construction parameters.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    pub preset: CharacterPreset,
}

pub struct SimulationEngine {
    world: World,
    time: SimTime,
    command_queue: VecDeque<PlayerCommand>,
    substrate: Box<dyn PhysicsSubstrate>,
    camera: Box<dyn ScreenRayCaster>,
    hub: EventHub,
    /// Events raised by systems during the current tick, published and
    /// snapshotted at the tick boundary.
    raised: Vec<GameEvent>,
    /// Events raised between ticks (direct operations, collision reports).
    /// Already published; carried into the next snapshot.
    delivered: Vec<GameEvent>,
    player: Entity,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(HeadlessSubstrate::new()),
            Box::new(OverheadCamera::default()),
        )
    }

    /// Build an engine around external physics and camera collaborators.
    pub fn with_collaborators(
        config: SimConfig,
        mut substrate: Box<dyn PhysicsSubstrate>,
        camera: Box<dyn ScreenRayCaster>,
    ) -> Self {
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, substrate.as_mut(), &config.preset);
        Self {
            world,
            time: SimTime::default(),
            command_queue: VecDeque::new(),
            substrate,
            camera,
            hub: EventHub::new(),
            raised: Vec::new(),
            delivered: Vec::new(),
            player,
        }
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation one fixed step and return the resulting
    /// snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        let dt = self.time.dt();

        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }

        systems::aim::run(&mut self.world, self.camera.as_ref(), &mut self.raised, dt);
        systems::locomotion::run(&mut self.world, dt);
        systems::attachment::run(&mut self.world);
        systems::throw::run(
            &mut self.world,
            self.substrate.as_mut(),
            &mut self.raised,
            dt,
        );

        self.latch_input_edges();
        self.time.advance();

        let raised = mem::take(&mut self.raised);
        for event in &raised {
            self.hub.publish(event);
        }
        let mut events = mem::take(&mut self.delivered);
        events.extend(raised);

        systems::snapshot::build(&self.world, self.time, events)
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Move { input } => {
                if let Ok(mut state) = self.world.get::<&mut InputState>(self.player) {
                    state.move_input = input;
                }
            }
            PlayerCommand::PointerMoved { position } => {
                if let Ok(mut state) = self.world.get::<&mut InputState>(self.player) {
                    state.pointer = position;
                }
            }
            PlayerCommand::Aim { held } => {
                if let Ok(mut state) = self.world.get::<&mut InputState>(self.player) {
                    state.aim_held = held;
                }
            }
            PlayerCommand::Fire { held } => {
                if let Ok(mut state) = self.world.get::<&mut InputState>(self.player) {
                    state.fire_held = held;
                }
            }
            PlayerCommand::InterruptCreation => {
                systems::throw::interrupt_creation(
                    &mut self.world,
                    self.substrate.as_mut(),
                    &mut self.raised,
                    self.player,
                );
            }
        }
    }

    /// Refresh previous-tick input copies and consume the pending movement
    /// vector.
    fn latch_input_edges(&mut self) {
        for (_, input) in self.world.query_mut::<&mut InputState>() {
            input.aim_was_held = input.aim_held;
            input.fire_was_held = input.fire_held;
            input.move_input = glam::Vec2::ZERO;
        }
    }

    /// Create a held projectile for the player immediately, outside the
    /// command flow.
    pub fn create_projectile(&mut self) -> bool {
        let mut events = Vec::new();
        let ok = systems::throw::create_projectile(
            &mut self.world,
            self.substrate.as_mut(),
            &mut events,
            self.player,
        );
        self.publish_now(events);
        ok
    }

    /// Throw the held projectile with an explicit charge duration.
    pub fn throw_projectile(&mut self, held_secs: f32) -> bool {
        let mut events = Vec::new();
        let ok = systems::throw::throw_projectile(
            &mut self.world,
            self.substrate.as_mut(),
            &mut events,
            self.player,
            held_secs,
        );
        self.publish_now(events);
        ok
    }

    /// Cancel the player's in-progress creation.
    pub fn interrupt_creation(&mut self) -> bool {
        let mut events = Vec::new();
        let ok = systems::throw::interrupt_creation(
            &mut self.world,
            self.substrate.as_mut(),
            &mut events,
            self.player,
        );
        self.publish_now(events);
        ok
    }

    fn publish_now(&mut self, events: Vec<GameEvent>) {
        for event in &events {
            self.hub.publish(event);
        }
        self.delivered.extend(events);
    }

    /// Register a listener for all outward events.
    pub fn subscribe(&mut self, listener: EventListener) -> SubscriberId {
        self.hub.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.hub.unsubscribe(id)
    }

    /// Deliver a collision-enter notification from the physics
    /// collaborator. Returns true when the collision produced a hit
    /// outcome; pre-launch contacts, disabled colliders, and excluded
    /// pairs are ignored.
    pub fn report_collision(&mut self, projectile: BodyId, other: BodyId) -> bool {
        let projectile_entity = match entity_of(projectile) {
            Some(entity) if self.world.contains(entity) => entity,
            _ => return false,
        };
        let other_entity = match entity_of(other) {
            Some(entity) if self.world.contains(entity) => entity,
            _ => return false,
        };

        let (owner, launched) = match self.world.get::<&Projectile>(projectile_entity) {
            Ok(body) => (body.owner, body.launched),
            Err(_) => return false,
        };
        if !launched {
            debug!(projectile = projectile.0, "ignoring pre-launch contact");
            return false;
        }
        match self.world.get::<&RigidState>(projectile_entity) {
            Ok(rigid) if rigid.collider_enabled => {}
            _ => return false,
        }
        if let Ok(exclusions) = self.world.get::<&CollisionExclusions>(projectile_entity) {
            if exclusions.bodies.contains(&other_entity) {
                return false;
            }
        }

        let entity_hit = self.world.get::<&Player>(other_entity).is_ok();
        let outcome = HitOutcome {
            thrower: owner.map(body_id),
            projectile,
            other,
            entity_hit,
        };
        let event = GameEvent::ProjectileHit(outcome);
        self.hub.publish(&event);
        // The instance listener fires once and is disarmed.
        if let Ok(listener) = self.world.remove_one::<InstanceHitListener>(projectile_entity) {
            if let Ok(mut callback) = listener.0.lock() {
                (&mut *callback)(&outcome);
            }
        }
        self.delivered.push(event);
        true
    }

    /// Remove a projectile from the world (consumed on impact, out of
    /// bounds).
    pub fn release_projectile(&mut self, id: BodyId) -> bool {
        let entity = match entity_of(id) {
            Some(entity) => entity,
            None => return false,
        };
        if self.world.get::<&Projectile>(entity).is_err() {
            return false;
        }
        self.substrate.release_body(id);
        self.world.despawn(entity).is_ok()
    }

    /// Add a static collidable obstacle to the world.
    pub fn spawn_obstacle(&mut self, position: Vec3) -> BodyId {
        let entity =
            world_setup::spawn_obstacle(&mut self.world, self.substrate.as_mut(), position);
        body_id(entity)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player_id(&self) -> BodyId {
        body_id(self.player)
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn player_entity(&self) -> Entity {
        self.player
    }
}
