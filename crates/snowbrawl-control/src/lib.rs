//! Pure controller logic for the SNOWBRAWL gameplay core.
//!
//! Aim projection, locomotion integration, and the throw state machine as
//! plain functions and state structs. No ECS dependency: the simulation
//! crate feeds these from its world each tick, which keeps every transition
//! unit-testable in isolation.

pub mod aim;
pub mod locomotion;
pub mod throw;
