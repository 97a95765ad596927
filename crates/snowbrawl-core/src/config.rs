//! Data-driven presets for characters and projectiles.
//!
//! Presets are plain serde structs loadable from JSON. Missing fields fall
//! back to the tuning defaults in `constants`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Throw behavior tuning for a thrower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowTuning {
    /// Vertical launch bias added to the throw direction before
    /// normalizing. 0 = straight ahead, 1 = straight up, -1 = straight
    /// down.
    pub launch_pitch: f32,
    /// Seconds it takes to pack a projectile before it is ready.
    pub creation_secs: f32,
    /// Charge-seconds to force multiplier.
    pub force_multiplier: f32,
    /// Upper bound on the final launch force. Clamps the product of charge
    /// duration and multiplier so arbitrarily long charges stay bounded.
    pub max_launch_force: f32,
}

impl Default for ThrowTuning {
    fn default() -> Self {
        Self {
            launch_pitch: DEFAULT_LAUNCH_PITCH,
            creation_secs: DEFAULT_CREATION_SECS,
            force_multiplier: DEFAULT_FORCE_MULTIPLIER,
            max_launch_force: DEFAULT_MAX_LAUNCH_FORCE,
        }
    }
}

/// A projectile template. The kind multiplier is applied on top of the
/// thrower's force multiplier before the launch-force cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileKind {
    pub name: String,
    pub force_multiplier: f32,
    /// Collider radius in meters. Visual/physical sizing only.
    pub radius: f32,
}

impl Default for ProjectileKind {
    fn default() -> Self {
        Self {
            name: "standard".into(),
            force_multiplier: 1.0,
            radius: 0.25,
        }
    }
}

/// Full character preset: movement, throw tuning, anchor placement, and the
/// default projectile kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterPreset {
    pub name: String,
    /// Movement speed in m/s.
    pub movement_speed: f32,
    /// Rotation speed in degrees/s.
    pub rotation_speed_deg: f32,
    /// Local offset of the projectile anchor relative to the character.
    pub anchor_offset: Vec3,
    pub throw: ThrowTuning,
    pub projectile: ProjectileKind,
}

impl Default for CharacterPreset {
    fn default() -> Self {
        Self {
            name: "The Dude".into(),
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            rotation_speed_deg: DEFAULT_ROTATION_SPEED_DEG,
            anchor_offset: Vec3::new(0.0, 1.2, 0.6),
            throw: ThrowTuning::default(),
            projectile: ProjectileKind::default(),
        }
    }
}

impl CharacterPreset {
    /// Parse a preset from JSON. Absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
