//! Sensor events delivered by the host at the start of each tick.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Tick};

/// One radar contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub energy: f64,
    /// Direction of travel in degrees.
    pub heading: f64,
    /// Units per tick; negative when reversing.
    pub speed: f64,
}

impl ScanEvent {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Every numeric field is a real number.
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.energy, self.heading, self.speed]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Everything the host can tell the agent about the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SensorEvent {
    /// An enemy was scanned.
    Scan(ScanEvent),
    /// We were hit; carries our position at the moment of impact.
    HitByBullet { x: f64, y: f64 },
    /// A bot was destroyed.
    Death { victim_id: u32 },
    /// A new round started. Clears all per-round state.
    RoundStarted,
    /// The round is over. The agent stops acting until the next round starts.
    RoundEnded,
    /// We drove into a wall.
    HitWall,
    /// We collided with another bot.
    HitBot { id: u32 },
}

/// Our own state as reported by the host this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnState {
    pub x: f64,
    pub y: f64,
    /// Body heading in degrees.
    pub heading: f64,
    /// Gun heading in degrees.
    pub gun_heading: f64,
    pub energy: f64,
    /// Distance left on the previous move command; 0 when idle.
    #[serde(default)]
    pub distance_remaining: f64,
}

impl OwnState {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.heading, self.gun_heading, self.energy]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for OwnState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            gun_heading: 0.0,
            energy: 100.0,
            distance_remaining: 0.0,
        }
    }
}

/// One tick's worth of input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub tick: Tick,
    pub own: OwnState,
    #[serde(default)]
    pub events: Vec<SensorEvent>,
}
