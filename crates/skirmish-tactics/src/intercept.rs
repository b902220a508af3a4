//! Linear lead prediction.
//!
//! A single pass: travel time is computed against the target's current
//! position, and the target is advanced along its heading for that long. The
//! result is not re-solved against the predicted point; targets are
//! re-predicted every tick anyway.

use skirmish_core::constants::*;
use skirmish_core::types::{heading_vector, Point};

use crate::enemy_model::EnemyRecord;

/// Host rule: `20 - 3 * firepower`, with firepower clamped to the legal range.
pub fn bullet_speed(firepower: f64) -> f64 {
    BULLET_BASE_SPEED - BULLET_SPEED_PER_POWER * firepower.clamp(MIN_FIREPOWER, MAX_FIREPOWER)
}

/// Ticks for a bullet to cover `distance`. Infinite for a non-positive speed.
pub fn travel_time(distance: f64, bullet_speed: f64) -> f64 {
    if bullet_speed <= 0.0 {
        f64::INFINITY
    } else {
        distance / bullet_speed
    }
}

/// Predicted aim point and the flight time it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub aim: Point,
    pub travel_time: f64,
}

/// Where `target` will be when a bullet fired now from `shooter` arrives.
pub fn predict(shooter: Point, target: &EnemyRecord, bullet_speed: f64) -> Prediction {
    let t = travel_time(target.distance_to(shooter), bullet_speed);
    if !t.is_finite() {
        return Prediction {
            aim: target.position,
            travel_time: t,
        };
    }
    Prediction {
        aim: target.position + heading_vector(target.heading) * target.speed * t,
        travel_time: t,
    }
}
