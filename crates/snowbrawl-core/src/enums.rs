//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Throw action lifecycle phase.
///
/// Exactly one projectile (or none) is associated with the thrower in any
/// phase beyond `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowPhase {
    /// No projectile held; creation is legal.
    #[default]
    Idle,
    /// A projectile is attached and being packed over the creation timer.
    /// Cancellable; interrupting discards the projectile.
    Creating,
    /// The projectile is packed and may be thrown or charged.
    Ready,
    /// Fire is held; charge duration accumulates in the input state.
    Charging,
    /// Transient: a successful throw passes through this phase and settles
    /// back at `Idle` within the same operation. Never observable in a
    /// snapshot.
    Thrown,
}

impl ThrowPhase {
    /// Whether a projectile is currently associated with the thrower.
    pub fn holds_projectile(&self) -> bool {
        matches!(self, Self::Creating | Self::Ready | Self::Charging)
    }

    /// Whether the held projectile is packed and legal to throw.
    pub fn ready_to_throw(&self) -> bool {
        matches!(self, Self::Ready | Self::Charging)
    }
}
