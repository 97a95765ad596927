//! Player commands sent from the input source to the simulation.
//!
//! Commands carry "as of this tick" values and are queued for processing at
//! the next tick boundary. Only the latest value per channel matters; no
//! buffering contract beyond latest-value is honored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// All possible player input actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Planar movement input (x = strafe, y = forward), usually normalized.
    Move { input: Vec2 },
    /// Pointer moved to a new screen position.
    PointerMoved { position: Vec2 },
    /// Aim button held or released.
    Aim { held: bool },
    /// Fire button held or released. Press starts creation or charging
    /// depending on the throw phase; release throws a charged projectile.
    Fire { held: bool },
    /// Cancel an in-progress projectile creation, discarding the projectile.
    /// No-op in any other phase.
    InterruptCreation,
}
