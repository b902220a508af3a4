//! Tactical decision engine for SKIRMISH.
//!
//! The six building blocks every strategy variant is made of: enemy
//! bookkeeping, the danger map, target selection, lead prediction, firepower
//! selection and movement planning. Pure data in, decisions out; no host
//! dependency.

pub mod enemy_model;
pub mod firepower;
pub mod intercept;
pub mod movement;
pub mod targeting;
pub mod threat_map;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
