//! Simulation constants and default tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Aiming ---

/// Fallback aim distance when the pointer ray never meets the ground plane:
/// the aim point defaults to this many meters ahead along the entity's
/// current forward, guaranteeing a stable orientation.
pub const AIM_FALLBACK_DISTANCE: f32 = 100.0;

// --- Character defaults ---

/// Default movement speed in m/s.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 4.0;

/// Default rotation speed in degrees/s.
pub const DEFAULT_ROTATION_SPEED_DEG: f32 = 360.0;

// --- Throw defaults ---

/// Vertical launch bias added to the throw direction before normalizing.
/// 0 launches straight ahead, 1 straight up, -1 straight down.
pub const DEFAULT_LAUNCH_PITCH: f32 = 0.2;

/// Seconds it takes to create (pack) a projectile.
pub const DEFAULT_CREATION_SECS: f32 = 1.5;

/// Charge-seconds to launch-force multiplier.
pub const DEFAULT_FORCE_MULTIPLIER: f32 = 100.0;

/// Upper bound on launch force so long charges can't get out of hand.
pub const DEFAULT_MAX_LAUNCH_FORCE: f32 = 10_000.0;
