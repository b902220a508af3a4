//! Known-enemy bookkeeping.
//!
//! One record per scanned id, updated in place on every re-scan and dropped
//! the moment the host reports that id's death.

use std::collections::HashMap;

use skirmish_core::constants::*;
use skirmish_core::events::ScanEvent;
use skirmish_core::types::{normalize_relative_angle, Point, Tick};

/// Everything we believe about one enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyRecord {
    pub id: u32,
    pub position: Point,
    /// Degrees, `[0, 360)` as reported by the host.
    pub heading: f64,
    /// Units per tick, signed.
    pub speed: f64,
    pub energy: f64,
    pub last_seen: Tick,
    /// Smoothed estimate in `[0, 1]` of how unpredictably this enemy moves.
    pub erraticness: f64,
    /// Energy lost since the previous scan, when the loss looks like a shot.
    pub energy_drop: Option<f64>,
}

impl EnemyRecord {
    fn from_scan(scan: &ScanEvent, tick: Tick) -> Self {
        Self {
            id: scan.id,
            position: scan.position(),
            heading: scan.heading,
            speed: scan.speed,
            energy: scan.energy.max(0.0),
            last_seen: tick,
            erraticness: 0.0,
            energy_drop: None,
        }
    }

    /// Apply a re-scan: smooth erraticness, detect shots, then overwrite kinematics.
    fn update(&mut self, scan: &ScanEvent, tick: Tick) {
        let instant = instantaneous_erraticness(self.heading, self.speed, scan.heading, scan.speed);
        self.erraticness = 0.5 * self.erraticness + 0.5 * instant;

        let new_energy = scan.energy.max(0.0);
        let drop = self.energy - new_energy;
        self.energy_drop =
            (SHOT_ENERGY_DROP_MIN..=SHOT_ENERGY_DROP_MAX).contains(&drop).then_some(drop);

        self.position = scan.position();
        self.heading = scan.heading;
        self.speed = scan.speed;
        self.energy = new_energy;
        self.last_seen = tick;
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        self.position.distance(p)
    }
}

/// Mean of the heading-change and speed-change fractions, clamped to `[0, 1]`.
pub fn instantaneous_erraticness(
    old_heading: f64,
    old_speed: f64,
    new_heading: f64,
    new_speed: f64,
) -> f64 {
    let heading_change = normalize_relative_angle(new_heading - old_heading).abs() / 180.0;
    let speed_change = ((new_speed - old_speed).abs() / MAX_SPEED).min(1.0);
    ((heading_change + speed_change) / 2.0).clamp(0.0, 1.0)
}

/// The single owner of all enemy records for one agent.
#[derive(Debug, Default)]
pub struct EnemyModel {
    records: HashMap<u32, EnemyRecord>,
}

impl EnemyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record or update the existing one for `scan.id`.
    ///
    /// A scan carrying NaN or infinite values is dropped and leaves any
    /// existing record untouched.
    pub fn observe(&mut self, scan: &ScanEvent, tick: Tick) -> Option<&EnemyRecord> {
        if !scan.is_finite() {
            tracing::warn!(id = scan.id, tick, "malformed scan ignored");
            return None;
        }
        let record = self
            .records
            .entry(scan.id)
            .and_modify(|r| r.update(scan, tick))
            .or_insert_with(|| EnemyRecord::from_scan(scan, tick));
        tracing::trace!(
            id = record.id,
            energy = record.energy,
            erraticness = record.erraticness,
            "enemy observed"
        );
        Some(record)
    }

    /// Forget a destroyed enemy. Unknown ids are ignored.
    pub fn remove(&mut self, id: u32) -> Option<EnemyRecord> {
        self.records.remove(&id)
    }

    pub fn get(&self, id: u32) -> Option<&EnemyRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Read-only view for this tick, ordered by id.
    pub fn snapshot(&self) -> EnemySnapshot<'_> {
        let mut records: Vec<&EnemyRecord> = self.records.values().collect();
        records.sort_unstable_by_key(|r| r.id);
        EnemySnapshot { records }
    }
}

/// Borrowed, id-ordered view of the enemy model.
///
/// Holding one keeps the model immutably borrowed, so the set cannot change
/// while a component iterates it.
#[derive(Debug, Clone)]
pub struct EnemySnapshot<'a> {
    records: Vec<&'a EnemyRecord>,
}

impl<'a> EnemySnapshot<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a EnemyRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn get(&self, id: u32) -> Option<&'a EnemyRecord> {
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| self.records[i])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recently scanned enemy; ties go to the lowest id.
    pub fn latest(&self) -> Option<&'a EnemyRecord> {
        let mut best: Option<&'a EnemyRecord> = None;
        for r in self.iter() {
            if best.map_or(true, |b| r.last_seen > b.last_seen) {
                best = Some(r);
            }
        }
        best
    }

    /// First enemy (by id) whose scan at `tick` showed a shot-sized energy drop.
    pub fn fired_recently(&self, tick: Tick) -> Option<&'a EnemyRecord> {
        self.iter()
            .find(|r| r.last_seen == tick && r.energy_drop.is_some())
    }
}
