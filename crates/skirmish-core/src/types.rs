//! Fundamental geometric types.
//!
//! Angles are in degrees, 0 along +x, counter-clockwise positive. The engine
//! never depends on where the host puts its origin, only on this convention
//! being applied consistently.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};

/// A position in arena units.
pub type Point = DVec2;

/// Game tick counter as delivered by the host.
pub type Tick = u64;

/// Axis-aligned arena bounds, `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length of the arena diagonal, the longest possible shot.
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp a point into the arena. NaN components collapse to 0.
    pub fn clamp(&self, p: Point) -> Point {
        let clamp_axis = |v: f64, max: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, max) };
        Point::new(clamp_axis(p.x, self.width), clamp_axis(p.y, self.height))
    }
}

/// Normalize a relative angle into `(-180, 180]`.
pub fn normalize_relative_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Normalize an absolute heading into `[0, 360)`.
pub fn normalize_absolute_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Absolute direction from one point to another.
pub fn direction_to(from: Point, to: Point) -> f64 {
    let d = to - from;
    normalize_absolute_angle(d.y.atan2(d.x).to_degrees())
}

/// Shortest turn (positive = left) that rotates `heading` onto the direction of `to`.
pub fn bearing_to(from: Point, heading: f64, to: Point) -> f64 {
    normalize_relative_angle(direction_to(from, to) - heading)
}

/// Unit vector for a heading in degrees.
pub fn heading_vector(degrees: f64) -> DVec2 {
    let r = degrees.to_radians();
    DVec2::new(r.cos(), r.sin())
}
