//! Tests for the simulation engine: creation/charge/throw flows, aiming,
//! movement, collision dispatch, and determinism.

use std::sync::{Arc, Mutex};

use glam::{Vec2, Vec3};

use snowbrawl_core::commands::PlayerCommand;
use snowbrawl_core::constants::DT;
use snowbrawl_core::enums::ThrowPhase;
use snowbrawl_core::events::{GameEvent, HitOutcome};
use snowbrawl_core::types::BodyId;

use crate::components::{HitListener, Projectile, Thrower};
use crate::engine::{SimConfig, SimulationEngine};
use crate::events::EventHub;
use crate::substrate::{HeadlessSubstrate, PhysicsSubstrate};
use crate::view::OverheadCamera;

/// Substrate handle shared between a test and the engine so recorded body
/// state stays inspectable.
#[derive(Clone, Default)]
struct SharedSubstrate(Arc<Mutex<HeadlessSubstrate>>);

impl SharedSubstrate {
    fn inner(&self) -> std::sync::MutexGuard<'_, HeadlessSubstrate> {
        self.0.lock().unwrap()
    }
}

impl PhysicsSubstrate for SharedSubstrate {
    fn register_body(&mut self, body: BodyId, kinematic: bool, collider_enabled: bool) {
        self.inner().register_body(body, kinematic, collider_enabled);
    }
    fn release_body(&mut self, body: BodyId) {
        self.inner().release_body(body);
    }
    fn set_kinematic(&mut self, body: BodyId, kinematic: bool) {
        self.inner().set_kinematic(body, kinematic);
    }
    fn set_collider_enabled(&mut self, body: BodyId, enabled: bool) {
        self.inner().set_collider_enabled(body, enabled);
    }
    fn add_exclusion(&mut self, a: BodyId, b: BodyId) {
        self.inner().add_exclusion(a, b);
    }
    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3) {
        self.inner().apply_impulse(body, impulse);
    }
}

fn engine_with_substrate() -> (SimulationEngine, SharedSubstrate) {
    let substrate = SharedSubstrate::default();
    let engine = SimulationEngine::with_collaborators(
        SimConfig::default(),
        Box::new(substrate.clone()),
        Box::new(OverheadCamera::default()),
    );
    (engine, substrate)
}

fn run_ticks(engine: &mut SimulationEngine, n: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(engine.tick().events);
    }
    events
}

fn thrown_info(events: &[GameEvent]) -> Option<(BodyId, Vec3, Vec3)> {
    events.iter().find_map(|event| match event {
        GameEvent::ProjectileThrown {
            projectile,
            origin,
            direction,
            ..
        } => Some((*projectile, *origin, *direction)),
        _ => None,
    })
}

/// Drive the full press / pack / charge / release cycle and return the
/// thrown projectile's id plus every event raised along the way.
fn launch_projectile(engine: &mut SimulationEngine, charge_ticks: usize) -> (BodyId, Vec<GameEvent>) {
    let mut events = Vec::new();

    engine.queue_command(PlayerCommand::Fire { held: true });
    events.extend(engine.tick().events);
    engine.queue_command(PlayerCommand::Fire { held: false });
    events.extend(engine.tick().events);
    // Let the creation timer run out with margin for accumulation error.
    events.extend(run_ticks(engine, 95));

    engine.queue_command(PlayerCommand::Fire { held: true });
    events.extend(run_ticks(engine, charge_ticks));
    engine.queue_command(PlayerCommand::Fire { held: false });
    events.extend(engine.tick().events);

    let (id, _, _) = thrown_info(&events).expect("projectile was thrown");
    (id, events)
}

#[test]
fn test_fire_press_creates_held_projectile() {
    let (mut engine, substrate) = engine_with_substrate();
    engine.queue_command(PlayerCommand::Fire { held: true });
    let snapshot = engine.tick();

    assert_eq!(snapshot.player.throw_phase, ThrowPhase::Creating);
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::CreationStarted { .. })));
    assert_eq!(snapshot.projectiles.len(), 1);
    let view = &snapshot.projectiles[0];
    assert!(view.attached);
    assert!(!view.launched);
    assert_eq!(view.owner, Some(engine.player_id()));

    let record = substrate.inner().body(view.id).expect("body registered");
    assert!(record.kinematic);
    assert!(!record.collider_enabled);
    assert!(substrate.inner().has_exclusion(view.id, engine.player_id()));
}

#[test]
fn test_second_create_while_holding_is_rejected() {
    let (mut engine, _substrate) = engine_with_substrate();
    assert!(engine.create_projectile());
    assert!(!engine.create_projectile());
    let snapshot = engine.tick();
    assert_eq!(snapshot.projectiles.len(), 1);
}

#[test]
fn test_creation_timer_transitions_to_ready_once() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_command(PlayerCommand::Fire { held: true });
    engine.tick();
    engine.queue_command(PlayerCommand::Fire { held: false });

    let mut ended = 0;
    let mut last_phase = ThrowPhase::Creating;
    for _ in 0..95 {
        let snapshot = engine.tick();
        ended += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::CreationEnded { success: true, .. }))
            .count();
        last_phase = snapshot.player.throw_phase;
    }
    assert_eq!(ended, 1);
    assert_eq!(last_phase, ThrowPhase::Ready);
}

#[test]
fn test_not_ready_before_creation_duration() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_command(PlayerCommand::Fire { held: true });
    engine.tick();
    engine.queue_command(PlayerCommand::Fire { held: false });
    // 1.5 s at 60 Hz needs ~90 ticks; 60 is well short.
    let events = run_ticks(&mut engine, 60);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::CreationEnded { .. })));
    assert_eq!(engine.tick().player.throw_phase, ThrowPhase::Creating);
}

#[test]
fn test_full_throw_cycle_launches_along_facing() {
    let (mut engine, substrate) = engine_with_substrate();
    let (id, events) = launch_projectile(&mut engine, 30);

    let (_, origin, direction) = thrown_info(&events).unwrap();
    assert_eq!(origin, Vec3::ZERO);
    let expected = Vec3::new(0.0, 0.2, 1.0).normalize();
    assert!((direction - expected).length() < 1e-5);

    // Half a second of charge at the default multiplier is ~50 N·s, applied
    // along the unpitched facing.
    let inner = substrate.inner();
    let (impulse_body, impulse) = *inner.impulses().last().expect("impulse applied");
    assert_eq!(impulse_body, id);
    assert!(impulse.y.abs() < 1e-6);
    assert!((impulse.z - 50.0).abs() < 0.1);

    let record = inner.body(id).expect("body still registered");
    assert!(!record.kinematic);
    assert!(record.collider_enabled);
    drop(inner);

    let snapshot = engine.tick();
    assert_eq!(snapshot.player.throw_phase, ThrowPhase::Idle);
    let view = &snapshot.projectiles[0];
    assert!(view.launched);
    assert!(!view.attached);
}

#[test]
fn test_throw_without_projectile_is_rejected() {
    let (mut engine, _substrate) = engine_with_substrate();
    assert!(!engine.throw_projectile(1.0));
    let snapshot = engine.tick();
    assert!(snapshot.projectiles.is_empty());
    assert!(!snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ProjectileThrown { .. })));
}

#[test]
fn test_interrupt_discards_projectile_and_allows_recreate() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_command(PlayerCommand::Fire { held: true });
    engine.tick();
    engine.queue_command(PlayerCommand::Fire { held: false });
    run_ticks(&mut engine, 30);

    assert!(engine.interrupt_creation());
    assert!(!engine.interrupt_creation());

    let snapshot = engine.tick();
    assert_eq!(snapshot.player.throw_phase, ThrowPhase::Idle);
    assert!(snapshot.projectiles.is_empty());
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::CreationEnded { success: false, .. })));

    assert!(engine.create_projectile());
    assert_eq!(engine.tick().player.throw_phase, ThrowPhase::Creating);
}

#[test]
fn test_interrupt_after_ready_is_a_no_op() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_command(PlayerCommand::Fire { held: true });
    engine.tick();
    engine.queue_command(PlayerCommand::Fire { held: false });
    run_ticks(&mut engine, 95);

    assert!(!engine.interrupt_creation());
    let snapshot = engine.tick();
    assert_eq!(snapshot.player.throw_phase, ThrowPhase::Ready);
    assert_eq!(snapshot.projectiles.len(), 1);
}

#[test]
fn test_create_fails_without_template() {
    let (mut engine, _substrate) = engine_with_substrate();
    let player = engine.player_entity();
    engine
        .world_mut()
        .get::<&mut Thrower>(player)
        .unwrap()
        .template = None;
    assert!(!engine.create_projectile());
    assert!(engine.tick().projectiles.is_empty());
}

#[test]
fn test_create_fails_without_anchor() {
    let (mut engine, _substrate) = engine_with_substrate();
    let player = engine.player_entity();
    engine
        .world_mut()
        .get::<&mut Thrower>(player)
        .unwrap()
        .anchor = None;
    assert!(!engine.create_projectile());
    assert!(engine.tick().projectiles.is_empty());
}

#[test]
fn test_collision_dispatches_to_global_and_instance_listeners_once() {
    let (mut engine, _substrate) = engine_with_substrate();

    let global_hits: Arc<Mutex<Vec<HitOutcome>>> = Arc::default();
    let sink = global_hits.clone();
    engine.subscribe(Box::new(move |event| {
        if let GameEvent::ProjectileHit(outcome) = event {
            sink.lock().unwrap().push(*outcome);
        }
    }));

    let instance_hits: Arc<Mutex<Vec<HitOutcome>>> = Arc::default();
    let sink = instance_hits.clone();
    let listener: HitListener = Arc::new(Mutex::new(move |outcome: &HitOutcome| {
        sink.lock().unwrap().push(*outcome);
    }));
    let player = engine.player_entity();
    engine
        .world_mut()
        .get::<&mut Thrower>(player)
        .unwrap()
        .hit_listener = Some(listener);

    let obstacle = engine.spawn_obstacle(Vec3::new(0.0, 0.0, 10.0));
    let (projectile, _) = launch_projectile(&mut engine, 30);

    assert!(engine.report_collision(projectile, obstacle));
    assert_eq!(global_hits.lock().unwrap().len(), 1);
    assert_eq!(instance_hits.lock().unwrap().len(), 1);
    let outcome = global_hits.lock().unwrap()[0];
    assert_eq!(outcome, instance_hits.lock().unwrap()[0]);
    assert_eq!(outcome.projectile, projectile);
    assert_eq!(outcome.other, obstacle);
    assert_eq!(outcome.thrower, Some(engine.player_id()));
    assert!(!outcome.entity_hit);

    // The instance listener is one-shot; the hub keeps delivering.
    assert!(engine.report_collision(projectile, obstacle));
    assert_eq!(global_hits.lock().unwrap().len(), 2);
    assert_eq!(instance_hits.lock().unwrap().len(), 1);
}

#[test]
fn test_collision_with_owner_is_excluded() {
    let (mut engine, _substrate) = engine_with_substrate();
    let (projectile, _) = launch_projectile(&mut engine, 30);
    assert!(!engine.report_collision(projectile, engine.player_id()));
}

#[test]
fn test_collision_before_launch_is_ignored() {
    let (mut engine, _substrate) = engine_with_substrate();
    let obstacle = engine.spawn_obstacle(Vec3::new(0.0, 0.0, 2.0));
    assert!(engine.create_projectile());
    let projectile = engine.tick().projectiles[0].id;
    assert!(!engine.report_collision(projectile, obstacle));
}

#[test]
fn test_player_hit_is_classified_as_entity_hit() {
    let (mut engine, _substrate) = engine_with_substrate();
    let (projectile, _) = launch_projectile(&mut engine, 10);

    // A second character in the world, not the owner.
    let other = {
        let world = engine.world_mut();
        crate::world_setup::spawn_player(
            world,
            &mut HeadlessSubstrate::new(),
            &snowbrawl_core::config::CharacterPreset::default(),
        )
    };
    let other_id = crate::components::body_id(other);

    let hits: Arc<Mutex<Vec<HitOutcome>>> = Arc::default();
    let sink = hits.clone();
    engine.subscribe(Box::new(move |event| {
        if let GameEvent::ProjectileHit(outcome) = event {
            sink.lock().unwrap().push(*outcome);
        }
    }));

    assert!(engine.report_collision(projectile, other_id));
    assert!(hits.lock().unwrap()[0].entity_hit);
}

#[test]
fn test_release_projectile_removes_it() {
    let (mut engine, substrate) = engine_with_substrate();
    let (projectile, _) = launch_projectile(&mut engine, 10);

    assert!(engine.release_projectile(projectile));
    assert!(engine.tick().projectiles.is_empty());
    assert!(substrate.inner().body(projectile).is_none());
    assert!(!engine.release_projectile(projectile));
}

#[test]
fn test_aiming_resolves_pointer_onto_ground_plane() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_commands([
        PlayerCommand::Aim { held: true },
        PlayerCommand::PointerMoved {
            position: Vec2::new(0.0, 10.0),
        },
    ]);
    let snapshot = engine.tick();

    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::AimingChanged { active: true, .. })));
    assert!(snapshot.player.aiming);
    assert!((snapshot.player.aim_point - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    // Straight ahead: no rotation needed.
    assert!((snapshot.player.rotation.to_axis_angle().1).abs() < 1e-5);
}

#[test]
fn test_aiming_turns_toward_offset_pointer() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_commands([
        PlayerCommand::Aim { held: true },
        PlayerCommand::PointerMoved {
            position: Vec2::new(5.0, 5.0),
        },
    ]);
    // At 360 deg/s the slerp converges well within a few seconds.
    run_ticks(&mut engine, 300);

    let snapshot = engine.tick();
    assert!((snapshot.player.aim_point - Vec3::new(5.0, 0.0, 5.0)).length() < 1e-5);
    let forward = snapshot.player.rotation * Vec3::Z;
    let expected = Vec3::new(5.0, 0.0, 5.0).normalize();
    assert!((forward - expected).length() < 1e-3);
}

#[test]
fn test_aim_state_freezes_when_aim_released() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_commands([
        PlayerCommand::Aim { held: true },
        PlayerCommand::PointerMoved {
            position: Vec2::new(3.0, 4.0),
        },
    ]);
    let frozen = engine.tick().player.aim_point;

    engine.queue_commands([
        PlayerCommand::Aim { held: false },
        PlayerCommand::PointerMoved {
            position: Vec2::new(-8.0, 1.0),
        },
    ]);
    let snapshot = engine.tick();
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::AimingChanged { active: false, .. })));
    assert_eq!(snapshot.player.aim_point, frozen);

    engine.queue_command(PlayerCommand::PointerMoved {
        position: Vec2::new(7.0, -2.0),
    });
    assert_eq!(engine.tick().player.aim_point, frozen);
}

#[test]
fn test_movement_displaces_and_reports_velocity() {
    let (mut engine, _substrate) = engine_with_substrate();
    engine.queue_command(PlayerCommand::Move {
        input: Vec2::new(0.0, 1.0),
    });
    let snapshot = engine.tick();

    let expected_z = snowbrawl_core::constants::DEFAULT_MOVEMENT_SPEED * DT;
    assert!((snapshot.player.position.z - expected_z).abs() < 1e-5);
    assert!((snapshot.player.velocity.z - snowbrawl_core::constants::DEFAULT_MOVEMENT_SPEED).abs() < 1e-3);

    // The pending vector is consumed; no input means no drift.
    let next = engine.tick();
    assert_eq!(next.player.position, snapshot.player.position);
    assert_eq!(next.player.velocity, Vec3::ZERO);
}

#[test]
fn test_held_projectile_follows_anchor_while_moving() {
    let (mut engine, _substrate) = engine_with_substrate();
    assert!(engine.create_projectile());
    let offset = snowbrawl_core::config::CharacterPreset::default().anchor_offset;

    for _ in 0..10 {
        engine.queue_command(PlayerCommand::Move {
            input: Vec2::new(1.0, 0.0),
        });
        engine.tick();
    }
    let snapshot = engine.tick();
    let view = &snapshot.projectiles[0];
    assert!(view.attached);
    assert!((view.position - (snapshot.player.position + offset)).length() < 1e-4);
}

#[test]
fn test_unsubscribed_listener_stops_receiving() {
    let (mut engine, _substrate) = engine_with_substrate();
    let count = Arc::new(Mutex::new(0usize));
    let sink = count.clone();
    let id = engine.subscribe(Box::new(move |_| {
        *sink.lock().unwrap() += 1;
    }));

    assert!(engine.create_projectile());
    let seen = *count.lock().unwrap();
    assert!(seen >= 1);

    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id));
    engine.interrupt_creation();
    assert_eq!(*count.lock().unwrap(), seen);
}

#[test]
fn test_event_hub_delivers_in_subscription_order() {
    let mut hub = EventHub::new();
    let order: Arc<Mutex<Vec<u8>>> = Arc::default();
    for tag in 0u8..3 {
        let sink = order.clone();
        hub.subscribe(Box::new(move |_| sink.lock().unwrap().push(tag)));
    }
    hub.publish(&GameEvent::CreationStarted {
        thrower: BodyId(1),
    });
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(hub.len(), 3);
}

#[test]
fn test_headless_substrate_exclusions_are_symmetric() {
    let mut substrate = HeadlessSubstrate::new();
    substrate.add_exclusion(BodyId(7), BodyId(3));
    assert!(substrate.has_exclusion(BodyId(3), BodyId(7)));
    assert!(!substrate.has_exclusion(BodyId(3), BodyId(4)));
}

#[test]
fn test_identical_command_scripts_produce_identical_snapshots() {
    let script = |engine: &mut SimulationEngine, tick: usize| {
        match tick {
            0 => engine.queue_commands([
                PlayerCommand::Aim { held: true },
                PlayerCommand::PointerMoved {
                    position: Vec2::new(4.0, 9.0),
                },
            ]),
            5 => engine.queue_command(PlayerCommand::Fire { held: true }),
            6 => engine.queue_command(PlayerCommand::Fire { held: false }),
            120 => engine.queue_command(PlayerCommand::Fire { held: true }),
            150 => engine.queue_command(PlayerCommand::Fire { held: false }),
            _ => {}
        }
        if (20..40).contains(&tick) {
            engine.queue_command(PlayerCommand::Move {
                input: Vec2::new(0.3, 0.7),
            });
        }
    };

    let mut a = SimulationEngine::new(SimConfig::default());
    let mut b = SimulationEngine::new(SimConfig::default());
    for tick in 0..200 {
        script(&mut a, tick);
        script(&mut b, tick);
        let snap_a = serde_json::to_string(&a.tick()).unwrap();
        let snap_b = serde_json::to_string(&b.tick()).unwrap();
        assert_eq!(snap_a, snap_b, "diverged at tick {tick}");
    }
}
