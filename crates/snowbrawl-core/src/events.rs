//! Events emitted by the simulation for effects, scoring, and UI feedback.
//!
//! Consumers subscribe through the engine's event hub; the core never
//! depends on subscriber presence. Every event also rides the tick's
//! snapshot.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::BodyId;

/// Outcome of a single projectile collision. Produced once per collision
/// event and delivered to global listeners first, then the per-instance
/// listener armed at launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitOutcome {
    /// The throwing entity, if it still exists.
    pub thrower: Option<BodyId>,
    pub projectile: BodyId,
    /// The struck body.
    pub other: BodyId,
    /// Whether the struck body is a controllable entity.
    pub entity_hit: bool,
}

/// Notifications broadcast outward by the gameplay core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Aiming was engaged or released.
    AimingChanged { entity: BodyId, active: bool },
    /// A thrower started packing a projectile.
    CreationStarted { thrower: BodyId },
    /// Packing finished (`success: true`) or was interrupted/failed
    /// (`success: false`).
    CreationEnded { thrower: BodyId, success: bool },
    /// Any projectile was thrown.
    ProjectileThrown {
        thrower: BodyId,
        projectile: BodyId,
        /// Thrower position at launch.
        origin: Vec3,
        /// Normalized launch direction including the vertical pitch bias.
        direction: Vec3,
    },
    /// Any projectile hit something.
    ProjectileHit(HitOutcome),
}
