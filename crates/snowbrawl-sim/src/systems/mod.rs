//! Per-tick simulation systems. The engine runs them in a fixed order:
//! aim, locomotion, attachment, throw.

pub mod aim;
pub mod attachment;
pub mod locomotion;
pub mod snapshot;
pub mod throw;
