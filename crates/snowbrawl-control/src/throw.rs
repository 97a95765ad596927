//! Throw action state machine and launch solution.
//!
//! Pure transition logic: the simulation layer performs the world-side
//! preconditions (anchor configured, template configured, owner collider)
//! and spawning; this machine only gates legality and runs the creation
//! timer. Charge duration is tracked by the input loop, not here — the
//! machine's role is to gate whether throwing is currently legal.

use glam::Vec3;

use snowbrawl_core::config::ThrowTuning;
use snowbrawl_core::enums::ThrowPhase;

/// Typed handle for an in-progress creation, returned by `begin_creation`
/// and required by `interrupt`. A stale token (from an earlier, already
/// finished creation) cancels nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationToken(u32);

/// Progress report from one creation-timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationProgress {
    /// Not currently creating; nothing advanced.
    NotCreating,
    /// Still packing.
    Packing,
    /// The creation duration elapsed this tick: Creating → Ready.
    /// Reported exactly once per creation.
    BecameReady,
}

/// Computed launch parameters for a throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowSolution {
    /// Impulse magnitude: charge seconds times the effective multiplier,
    /// clamped to the tuning's launch-force cap.
    pub force: f32,
    /// Normalized throw direction with the vertical pitch bias applied.
    /// Carried on the thrown notification; the impulse itself is applied
    /// along the raw direction.
    pub launch_direction: Vec3,
}

/// Compute the launch force and direction for a throw.
pub fn solve_throw(
    direction: Vec3,
    held_secs: f32,
    tuning: &ThrowTuning,
    kind_multiplier: f32,
) -> ThrowSolution {
    let force = (held_secs * tuning.force_multiplier * kind_multiplier)
        .min(tuning.max_launch_force);
    let launch_direction =
        (direction + Vec3::new(0.0, tuning.launch_pitch, 0.0)).normalize_or_zero();
    ThrowSolution {
        force,
        launch_direction,
    }
}

/// The throw lifecycle state machine.
///
/// ```text
/// Idle --begin_creation--> Creating --timer--> Ready
/// Ready --begin_charge--> Charging
/// Ready/Charging --throw--> Thrown --(immediate)--> Idle
/// Creating --interrupt(token)--> Idle
/// ```
#[derive(Debug, Clone)]
pub struct ThrowFsm {
    phase: ThrowPhase,
    creation_elapsed: f32,
    creation_secs: f32,
    next_token: u32,
    current_token: Option<CreationToken>,
}

impl ThrowFsm {
    pub fn new(creation_secs: f32) -> Self {
        Self {
            phase: ThrowPhase::Idle,
            creation_elapsed: 0.0,
            creation_secs,
            next_token: 0,
            current_token: None,
        }
    }

    pub fn phase(&self) -> ThrowPhase {
        self.phase
    }

    pub fn holds_projectile(&self) -> bool {
        self.phase.holds_projectile()
    }

    pub fn ready_to_throw(&self) -> bool {
        self.phase.ready_to_throw()
    }

    /// Start packing a projectile. Legal only from `Idle`; returns the
    /// cancellation token on success.
    pub fn begin_creation(&mut self) -> Option<CreationToken> {
        if self.phase != ThrowPhase::Idle {
            return None;
        }
        let token = CreationToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.phase = ThrowPhase::Creating;
        self.creation_elapsed = 0.0;
        self.current_token = Some(token);
        Some(token)
    }

    /// Advance the creation timer by one tick. `BecameReady` is reported
    /// exactly once when the accumulated time reaches the creation
    /// duration; subsequent ticks report `NotCreating`.
    pub fn creation_tick(&mut self, dt: f32) -> CreationProgress {
        if self.phase != ThrowPhase::Creating {
            return CreationProgress::NotCreating;
        }
        self.creation_elapsed += dt;
        if self.creation_elapsed >= self.creation_secs {
            self.phase = ThrowPhase::Ready;
            self.current_token = None;
            CreationProgress::BecameReady
        } else {
            CreationProgress::Packing
        }
    }

    /// Cancel an in-progress creation. Idempotent: returns false (and
    /// changes nothing) unless currently `Creating` with a matching token.
    pub fn interrupt(&mut self, token: CreationToken) -> bool {
        if self.phase != ThrowPhase::Creating || self.current_token != Some(token) {
            return false;
        }
        self.phase = ThrowPhase::Idle;
        self.creation_elapsed = 0.0;
        self.current_token = None;
        true
    }

    /// Enter the charging phase. Legal only from `Ready`.
    pub fn begin_charge(&mut self) -> bool {
        if self.phase != ThrowPhase::Ready {
            return false;
        }
        self.phase = ThrowPhase::Charging;
        true
    }

    /// Gate a throw. Legal from `Ready` or `Charging`; on success the
    /// machine passes through the transient `Thrown` phase and settles at
    /// `Idle` so the next creation is immediately legal.
    pub fn throw(&mut self) -> bool {
        if !self.ready_to_throw() {
            return false;
        }
        self.phase = ThrowPhase::Thrown;
        self.phase = ThrowPhase::Idle;
        true
    }

    /// Seconds accumulated on the current creation timer.
    pub fn creation_elapsed(&self) -> f32 {
        self.creation_elapsed
    }
}
