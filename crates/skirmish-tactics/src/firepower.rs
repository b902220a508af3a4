//! Shot strength selection.
//!
//! The optimizer is the engine's only search: every legal firepower on a
//! 0.1 grid is scored by expected damage minus energy spent. Pure functions
//! only, so the same inputs always produce the same choice.

use skirmish_core::config::{FirepowerPolicy, OptimizerParams};
use skirmish_core::constants::*;
use skirmish_core::types::Arena;

use crate::enemy_model::EnemyRecord;
use crate::intercept::{bullet_speed, travel_time};

/// Inputs of the hit-probability model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotContext {
    pub distance: f64,
    pub erraticness: f64,
    pub target_speed: f64,
    pub arena_diagonal: f64,
}

impl ShotContext {
    pub fn new(target: &EnemyRecord, distance: f64, arena: &Arena) -> Self {
        Self {
            distance,
            erraticness: target.erraticness,
            target_speed: target.speed,
            arena_diagonal: arena.diagonal(),
        }
    }
}

/// A scored firepower candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirepowerChoice {
    pub firepower: f64,
    pub hit_probability: f64,
    pub expected_value: f64,
}

/// Host damage rule: `4p` up to 1, plus `2(p - 1)` above it.
pub fn bullet_damage(firepower: f64) -> f64 {
    if firepower <= 1.0 {
        4.0 * firepower
    } else {
        4.0 * firepower + 2.0 * (firepower - 1.0)
    }
}

pub fn hit_probability(ctx: &ShotContext, firepower: f64, decay: f64) -> f64 {
    let stability = (1.0 - ctx.erraticness).clamp(0.0, 1.0);
    let distance_factor = (1.0 - ctx.distance / ctx.arena_diagonal.max(EPSILON)).max(0.0);
    let speed_factor = (1.0 - ctx.target_speed.abs() / MAX_SPEED).max(MIN_SPEED_FACTOR);
    let flight = travel_time(ctx.distance, bullet_speed(firepower));
    let decay_factor = (-decay * flight).exp();
    stability * distance_factor * speed_factor * decay_factor
}

pub fn evaluate(ctx: &ShotContext, firepower: f64, decay: f64) -> FirepowerChoice {
    let p = hit_probability(ctx, firepower, decay);
    FirepowerChoice {
        firepower,
        hit_probability: p,
        expected_value: p * bullet_damage(firepower) - firepower,
    }
}

/// Ascending candidates `0.1, 0.2, ...` up to `min(self_energy, cap, 3.0)`.
pub fn candidates(self_energy: f64, cap: f64) -> impl Iterator<Item = f64> {
    let steps_per_unit = (1.0 / FIREPOWER_STEP).round();
    let ceiling = self_energy.min(cap).min(MAX_FIREPOWER);
    // small slack so 3.0 / 0.1 lands on 30, not 29
    let count = if ceiling.is_finite() && ceiling >= MIN_FIREPOWER {
        (ceiling * steps_per_unit + 1e-9).floor() as u32
    } else {
        0
    };
    (1..=count).map(move |k| k as f64 / steps_per_unit)
}

/// Maximum expected-value firepower; the lowest candidate wins ties.
/// `None` when not even the minimum shot is affordable.
pub fn choose_firepower(
    target: &EnemyRecord,
    distance: f64,
    self_energy: f64,
    arena: &Arena,
    params: &OptimizerParams,
) -> Option<FirepowerChoice> {
    let ctx = ShotContext::new(target, distance, arena);
    let mut best: Option<FirepowerChoice> = None;
    for fp in candidates(self_energy, params.cap) {
        let choice = evaluate(&ctx, fp, params.decay);
        if choice.expected_value.is_nan() {
            continue;
        }
        match best {
            Some(b) if choice.expected_value <= b.expected_value => {}
            _ => best = Some(choice),
        }
    }
    best
}

/// Resolve a configured policy into a concrete shot. Non-optimized policies
/// are still clamped to what we can afford and scored for logging.
pub fn resolve(
    policy: &FirepowerPolicy,
    target: &EnemyRecord,
    distance: f64,
    self_energy: f64,
    arena: &Arena,
    params: &OptimizerParams,
) -> Option<FirepowerChoice> {
    let requested = match policy {
        FirepowerPolicy::Optimized => {
            return choose_firepower(target, distance, self_energy, arena, params);
        }
        FirepowerPolicy::Hold => return None,
        FirepowerPolicy::Fixed { power } => *power,
        FirepowerPolicy::DistanceBands {
            bands,
            fallback,
            edge,
        } => bands
            .iter()
            .find(|b| edge.admits(distance, b.within))
            .map_or(*fallback, |b| b.power),
    };

    let affordable = self_energy.min(MAX_FIREPOWER);
    if affordable < MIN_FIREPOWER {
        return None;
    }
    let fp = requested.clamp(MIN_FIREPOWER, affordable);
    Some(evaluate(
        &ShotContext::new(target, distance, arena),
        fp,
        params.decay,
    ))
}
