//! Simulation engine for the SNOWBRAWL gameplay core.
//!
//! Owns the hecs ECS world, processes input commands at tick boundaries,
//! runs the aim/locomotion/throw systems in a fixed order, and produces
//! `GameStateSnapshot`s. Completely headless: physics and camera
//! collaborators plug in behind small trait seams, enabling deterministic
//! testing.

pub mod components;
pub mod engine;
pub mod events;
pub mod substrate;
pub mod systems;
pub mod view;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use snowbrawl_core as core;

#[cfg(test)]
mod tests;
