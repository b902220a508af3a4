//! Actuator commands sent back to the host.
//!
//! A tick produces at most one movement directive and at most one fire
//! directive; `TickCommands` enforces that shape and flattens it into the
//! host's command stream.

use serde::{Deserialize, Serialize};

/// A single host command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActuatorCommand {
    /// Rotate the body; positive turns left (counter-clockwise).
    Turn { degrees: f64 },
    /// Rotate the gun; positive turns left.
    TurnGun { degrees: f64 },
    /// Drive; negative distances drive backward.
    Move { distance: f64 },
    /// Fire a bullet.
    Fire { firepower: f64 },
}

/// Turn first, then drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    /// Relative turn in `(-180, 180]`.
    pub turn: f64,
    pub distance: f64,
}

/// Traverse the gun, then fire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireOrder {
    /// Relative gun turn in `(-180, 180]`.
    pub gun_turn: f64,
    pub firepower: f64,
}

/// The coherent set of commands for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickCommands {
    pub maneuver: Option<Maneuver>,
    pub fire: Option<FireOrder>,
}

impl TickCommands {
    pub fn is_empty(&self) -> bool {
        self.maneuver.is_none() && self.fire.is_none()
    }

    /// Flatten into host order: body turn, move, gun turn, fire.
    /// Zero-length turns and moves are dropped.
    pub fn to_commands(&self) -> Vec<ActuatorCommand> {
        let mut out = Vec::with_capacity(4);
        if let Some(m) = self.maneuver {
            if m.turn != 0.0 {
                out.push(ActuatorCommand::Turn { degrees: m.turn });
            }
            if m.distance != 0.0 {
                out.push(ActuatorCommand::Move {
                    distance: m.distance,
                });
            }
        }
        if let Some(f) = self.fire {
            if f.gun_turn != 0.0 {
                out.push(ActuatorCommand::TurnGun {
                    degrees: f.gun_turn,
                });
            }
            out.push(ActuatorCommand::Fire {
                firepower: f.firepower,
            });
        }
        out
    }
}
