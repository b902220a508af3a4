//! Agent runtime for SKIRMISH.
//!
//! Wires the tactical components into a per-tick state machine and ships
//! the strategy variants as configuration presets.

pub mod agent;
pub mod profiles;

pub use agent::{Agent, RoundStats};
pub use skirmish_core as core;
