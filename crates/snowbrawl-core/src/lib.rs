//! Core types and definitions for the SNOWBRAWL gameplay core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, presets, and constants.
//! It has no dependency on any ECS or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
