//! Simulation-side components that reference other entities.
//!
//! Plain-data components without entity references live in
//! `snowbrawl_core::components`; anything holding a `hecs::Entity` stays in
//! this crate so the core vocabulary remains framework-free.

use std::sync::{Arc, Mutex};

use glam::{Quat, Vec3};
use hecs::Entity;

use snowbrawl_core::config::{CharacterPreset, ProjectileKind, ThrowTuning};
use snowbrawl_core::events::HitOutcome;
use snowbrawl_core::types::BodyId;
use snowbrawl_control::throw::{CreationToken, ThrowFsm};

/// Per-instance hit listener, armed on a projectile at launch and removed
/// after its first delivery.
pub type HitListener = Arc<Mutex<dyn FnMut(&HitOutcome) + Send + 'static>>;

/// Map an entity to the opaque body handle used at outward boundaries.
pub fn body_id(entity: Entity) -> BodyId {
    BodyId(entity.to_bits().get())
}

/// Resolve an opaque body handle back to an entity id. The entity may no
/// longer exist in the world.
pub fn entity_of(id: BodyId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Parent/child attachment with a local offset and rotation, replacing
/// scene-graph parenting. The attachment system syncs world poses each
/// tick.
#[derive(Debug, Clone, Copy)]
pub struct AttachedTo {
    pub parent: Entity,
    pub local_offset: Vec3,
    pub local_rotation: Quat,
}

/// The throw action component: state machine, tuning, and the exclusive
/// current-projectile slot. The slot is `Some` exactly while the phase
/// holds a projectile and is cleared before ownership handoff completes at
/// launch.
pub struct Thrower {
    pub fsm: ThrowFsm,
    pub tuning: ThrowTuning,
    /// Template the projectile is instantiated from. Creation fails without
    /// one.
    pub template: Option<ProjectileKind>,
    /// Attachment point for held projectiles. Creation fails without one.
    pub anchor: Option<Entity>,
    /// The currently held projectile, if any.
    pub projectile: Option<Entity>,
    /// Cancellation token for the in-progress creation.
    pub creation: Option<CreationToken>,
    /// Scoring hook: cloned onto each projectile at launch as its one-shot
    /// instance hit listener.
    pub hit_listener: Option<HitListener>,
}

impl Thrower {
    pub fn from_preset(preset: &CharacterPreset, anchor: Entity) -> Self {
        Self {
            fsm: ThrowFsm::new(preset.throw.creation_secs),
            tuning: preset.throw,
            template: Some(preset.projectile.clone()),
            anchor: Some(anchor),
            projectile: None,
            creation: None,
            hit_listener: None,
        }
    }
}

/// A thrown or held projectile body.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// The entity that created this projectile.
    pub owner: Option<Entity>,
    pub launched: bool,
}

/// Standing collision-exclusion set: bodies that never generate collision
/// events against this one. The same pairs are registered with the physics
/// substrate.
#[derive(Debug, Clone, Default)]
pub struct CollisionExclusions {
    pub bodies: Vec<Entity>,
}

/// One-shot hit listener component, present only between launch and the
/// first collision delivery.
pub struct InstanceHitListener(pub HitListener);
