//! Core types and definitions for the SKIRMISH tactical engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! sensor events, actuator commands, engine configuration, and constants.
//! It has no dependency on any host runtime.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod types;
