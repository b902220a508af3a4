//! Target selection among known enemies.

use skirmish_core::config::{TargetPolicy, TargetWeights};
use skirmish_core::constants::EPSILON;
use skirmish_core::types::Point;

use crate::enemy_model::{EnemyRecord, EnemySnapshot};

/// `w.distance / distance + w.energy / energy`, both denominators floored at ε.
pub fn target_score(enemy: &EnemyRecord, shooter: Point, weights: &TargetWeights) -> f64 {
    let distance = enemy.distance_to(shooter).max(EPSILON);
    let energy = enemy.energy.max(EPSILON);
    weights.distance / distance + weights.energy / energy
}

/// Highest-scoring enemy, or `None` for an empty snapshot.
///
/// Ties keep the first enemy in id order. Enemies at a non-finite distance
/// are never selected.
pub fn select_target<'a>(
    enemies: &EnemySnapshot<'a>,
    shooter: Point,
    weights: &TargetWeights,
) -> Option<&'a EnemyRecord> {
    let mut best: Option<(&'a EnemyRecord, f64)> = None;
    for enemy in enemies.iter() {
        if !enemy.distance_to(shooter).is_finite() {
            continue;
        }
        let score = target_score(enemy, shooter, weights);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((enemy, score)),
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// Dispatch on the configured policy.
pub fn pick<'a>(
    policy: &TargetPolicy,
    enemies: &EnemySnapshot<'a>,
    shooter: Point,
) -> Option<&'a EnemyRecord> {
    let target = match policy {
        TargetPolicy::Scored(weights) => select_target(enemies, shooter, weights),
        TargetPolicy::MostRecent => enemies.latest(),
    };
    if let Some(t) = target {
        tracing::debug!(id = t.id, energy = t.energy, "target selected");
    }
    target
}
