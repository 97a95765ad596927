//! Game state snapshot: the complete visible state produced each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::ThrowPhase;
use crate::events::GameEvent;
use crate::types::{BodyId, SimTime};

/// Complete game state for consumers (rendering, replay, tests) after each
/// tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub player: PlayerView,
    pub projectiles: Vec<ProjectileView>,
    /// Events raised since the previous snapshot, in raise order.
    pub events: Vec<GameEvent>,
}

/// The controllable character's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: BodyId,
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub aiming: bool,
    /// Last resolved world aim point.
    pub aim_point: Vec3,
    pub throw_phase: ThrowPhase,
    /// Seconds the fire input has been held while charging.
    pub charge_secs: f32,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            id: BodyId(0),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            aiming: false,
            aim_point: Vec3::ZERO,
            throw_phase: ThrowPhase::Idle,
            charge_secs: 0.0,
        }
    }
}

/// A projectile's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: BodyId,
    pub position: Vec3,
    pub launched: bool,
    /// Whether the projectile is still attached to its anchor.
    pub attached: bool,
    pub owner: Option<BodyId>,
}
