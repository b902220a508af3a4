//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// The strategy variants shipped with the engine. Each is a preset of
/// `EngineConfig`; see `skirmish_agent::profiles`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Full engine: scored targeting, lead prediction, firepower search, stealth movement.
    #[default]
    Canonical,
    /// Danger-map evasion with fixed heavy shots.
    Stealth,
    /// Closes on the cheapest kill and fires by distance band.
    Seeker,
    /// Predictive shooting while strafing around the last scanned enemy.
    Strafer,
    /// Holds the top edge of the arena and dodges incoming fire.
    HighGround,
    /// Tracks enemies but issues no commands.
    Idle,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Canonical,
        Variant::Stealth,
        Variant::Seeker,
        Variant::Strafer,
        Variant::HighGround,
        Variant::Idle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Canonical => "canonical",
            Variant::Stealth => "stealth",
            Variant::Seeker => "seeker",
            Variant::Strafer => "strafer",
            Variant::HighGround => "high-ground",
            Variant::Idle => "idle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }
}

/// How the movement planner picks the next maneuver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Move to a jittered point in the least dangerous grid cell.
    #[default]
    Stealth,
    /// Close on the target, then maneuver laterally.
    Aggressive,
    /// Keep strafing around the target, reversing on collisions.
    Strafe,
    /// Claim the top of the arena and evade detected shots.
    HighGround,
    /// Do not move.
    Hold,
}

/// Per-tick agent lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentPhase {
    /// Waiting for the next event batch.
    #[default]
    Idle,
    /// Applying sensor events to the enemy model and threat map.
    Scanning,
    /// Running target selection, prediction, firepower and movement planning.
    Deciding,
    /// Emitting this tick's commands.
    Acting,
    /// Round over; state has been reset and no commands are issued.
    Ended,
}
