//! Physics substrate seam.
//!
//! The gameplay core does not simulate rigid bodies or detect collisions;
//! it drives an external physics collaborator through this contract and
//! receives collision-enter notifications back through
//! `SimulationEngine::report_collision`. `HeadlessSubstrate` is the
//! in-crate ledger implementation: it records body flags, exclusion pairs,
//! and impulses without simulating anything, which keeps the engine fully
//! headless for tests and replay.

use std::collections::{HashMap, HashSet};

use glam::Vec3;

use snowbrawl_core::types::BodyId;

/// Operations the core issues to the physics collaborator.
pub trait PhysicsSubstrate: Send {
    /// Announce a new body with its initial flags.
    fn register_body(&mut self, body: BodyId, kinematic: bool, collider_enabled: bool);
    /// Release a body (destroyed or discarded).
    fn release_body(&mut self, body: BodyId);
    /// Toggle physics simulation for a body.
    fn set_kinematic(&mut self, body: BodyId, kinematic: bool);
    /// Toggle collision detection for a body.
    fn set_collider_enabled(&mut self, body: BodyId, enabled: bool);
    /// Register a standing collision-exclusion pair.
    fn add_exclusion(&mut self, a: BodyId, b: BodyId);
    /// Apply an instantaneous force impulse at the body's center.
    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3);
}

/// Recorded flags for one body.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyRecord {
    pub kinematic: bool,
    pub collider_enabled: bool,
}

/// Ledger-only substrate: records every call, simulates nothing.
#[derive(Debug, Default)]
pub struct HeadlessSubstrate {
    bodies: HashMap<BodyId, BodyRecord>,
    exclusions: HashSet<(BodyId, BodyId)>,
    impulses: Vec<(BodyId, Vec3)>,
}

impl HeadlessSubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, body: BodyId) -> Option<BodyRecord> {
        self.bodies.get(&body).copied()
    }

    pub fn has_exclusion(&self, a: BodyId, b: BodyId) -> bool {
        self.exclusions.contains(&ordered(a, b))
    }

    /// All impulses applied so far, in application order.
    pub fn impulses(&self) -> &[(BodyId, Vec3)] {
        &self.impulses
    }
}

fn ordered(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a.0 <= b.0 {
        (a, b)
    } else {
        (b, a)
    }
}

impl PhysicsSubstrate for HeadlessSubstrate {
    fn register_body(&mut self, body: BodyId, kinematic: bool, collider_enabled: bool) {
        self.bodies.insert(
            body,
            BodyRecord {
                kinematic,
                collider_enabled,
            },
        );
    }

    fn release_body(&mut self, body: BodyId) {
        self.bodies.remove(&body);
        self.exclusions.retain(|(a, b)| *a != body && *b != body);
    }

    fn set_kinematic(&mut self, body: BodyId, kinematic: bool) {
        if let Some(record) = self.bodies.get_mut(&body) {
            record.kinematic = kinematic;
        }
    }

    fn set_collider_enabled(&mut self, body: BodyId, enabled: bool) {
        if let Some(record) = self.bodies.get_mut(&body) {
            record.collider_enabled = enabled;
        }
    }

    fn add_exclusion(&mut self, a: BodyId, b: BodyId) {
        self.exclusions.insert(ordered(a, b));
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3) {
        self.impulses.push((body, impulse));
    }
}
