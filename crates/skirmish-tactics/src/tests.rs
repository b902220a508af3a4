//! Tests for the enemy model, threat map, targeting, prediction, firepower and movement.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::Maneuver;
use skirmish_core::config::*;
use skirmish_core::constants::*;
use skirmish_core::enums::MovementMode;
use skirmish_core::events::{OwnState, ScanEvent};
use skirmish_core::types::{Arena, Point};

use crate::enemy_model::{instantaneous_erraticness, EnemyModel, EnemyRecord};
use crate::firepower::{self, bullet_damage, candidates, choose_firepower, evaluate, ShotContext};
use crate::intercept::{bullet_speed, predict, travel_time};
use crate::movement::{MovementPlanner, PlanContext};
use crate::targeting::{pick, select_target, target_score};
use crate::threat_map::{CellIndex, ThreatMap};

fn scan(id: u32, x: f64, y: f64, energy: f64, heading: f64, speed: f64) -> ScanEvent {
    ScanEvent {
        id,
        x,
        y,
        energy,
        heading,
        speed,
    }
}

fn record(id: u32, x: f64, y: f64, energy: f64) -> EnemyRecord {
    let mut model = EnemyModel::new();
    model
        .observe(&scan(id, x, y, energy, 0.0, 0.0), 0)
        .unwrap()
        .clone()
}

fn own_at(x: f64, y: f64, heading: f64) -> OwnState {
    OwnState {
        x,
        y,
        heading,
        ..Default::default()
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---- EnemyModel ----

#[test]
fn test_first_scan_creates_calm_record() {
    let mut model = EnemyModel::new();
    let r = model.observe(&scan(1, 10.0, 20.0, 100.0, 45.0, 8.0), 3).unwrap();
    assert_eq!(r.position, Point::new(10.0, 20.0));
    assert_eq!(r.last_seen, 3);
    assert_eq!(r.erraticness, 0.0);
    assert_eq!(r.energy_drop, None);
    assert_eq!(model.len(), 1);
}

#[test]
fn test_rescan_updates_in_place_and_smooths_erraticness() {
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 0.0, 0.0, 100.0, 0.0, 0.0), 1);
    // heading +90 (0.5), speed 0 -> 8 (1.0): instantaneous 0.75, stored 0.375
    let r = model.observe(&scan(1, 5.0, 5.0, 100.0, 90.0, 8.0), 2).unwrap();
    assert!(approx(r.erraticness, 0.375));
    assert_eq!(r.position, Point::new(5.0, 5.0));
    assert_eq!(r.last_seen, 2);
    // steady scan halves it again
    let r = model.observe(&scan(1, 5.0, 13.0, 100.0, 90.0, 8.0), 3).unwrap();
    assert!(approx(r.erraticness, 0.1875));
    assert_eq!(model.len(), 1);
}

#[test]
fn test_erraticness_uses_shortest_heading_change() {
    // 350 -> 10 is a 20 degree change, not 340
    assert!(approx(
        instantaneous_erraticness(350.0, 4.0, 10.0, 4.0),
        (20.0 / 180.0) / 2.0
    ));
    // reversing at full speed saturates the speed term
    assert!(approx(instantaneous_erraticness(0.0, 8.0, 180.0, -8.0), 1.0));
}

#[test]
fn test_death_removes_record_and_is_idempotent() {
    let mut model = EnemyModel::new();
    model.observe(&scan(7, 0.0, 0.0, 50.0, 0.0, 0.0), 1);
    assert!(model.remove(7).is_some());
    assert!(!model.snapshot().contains(7));
    assert!(model.remove(7).is_none());
    assert!(model.remove(999).is_none());
    assert!(model.get(7).is_none());
}

#[test]
fn test_energy_drop_detects_shots_only() {
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 0.0, 0.0, 50.0, 0.0, 0.0), 1);
    let r = model.observe(&scan(1, 0.0, 0.0, 48.0, 0.0, 0.0), 2).unwrap();
    assert!(approx(r.energy_drop.unwrap(), 2.0));
    // a 10 point loss is damage taken, not a shot
    let r = model.observe(&scan(1, 0.0, 0.0, 38.0, 0.0, 0.0), 3).unwrap();
    assert_eq!(r.energy_drop, None);
    let r = model.observe(&scan(1, 0.0, 0.0, 38.0, 0.0, 0.0), 4).unwrap();
    assert_eq!(r.energy_drop, None);
}

#[test]
fn test_snapshot_is_id_ordered() {
    let mut model = EnemyModel::new();
    for id in [9, 2, 5, 1] {
        model.observe(&scan(id, 0.0, 0.0, 10.0, 0.0, 0.0), id as u64);
    }
    let snap = model.snapshot();
    let ids: Vec<u32> = snap.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 5, 9]);
    assert_eq!(snap.get(5).map(|r| r.id), Some(5));
    assert!(snap.get(3).is_none());
    assert_eq!(snap.latest().map(|r| r.id), Some(9));
}

#[test]
fn test_latest_tie_goes_to_lowest_id() {
    let mut model = EnemyModel::new();
    model.observe(&scan(4, 0.0, 0.0, 10.0, 0.0, 0.0), 7);
    model.observe(&scan(3, 0.0, 0.0, 10.0, 0.0, 0.0), 7);
    assert_eq!(model.snapshot().latest().map(|r| r.id), Some(3));
}

#[test]
fn test_malformed_scan_is_ignored() {
    let mut model = EnemyModel::new();
    assert!(model
        .observe(&scan(1, f64::NAN, 100.0, 50.0, 0.0, 0.0), 1)
        .is_none());
    assert!(model.is_empty());

    model.observe(&scan(2, 100.0, 100.0, 50.0, 0.0, 0.0), 1);
    assert!(model
        .observe(&scan(2, 120.0, 100.0, 50.0, 0.0, f64::INFINITY), 2)
        .is_none());
    let kept = model.get(2).unwrap();
    assert_eq!(kept.position, Point::new(100.0, 100.0));
    assert_eq!(kept.last_seen, 1);
}

#[test]
fn test_fired_recently_only_reports_this_tick() {
    let mut model = EnemyModel::new();
    model.observe(&scan(4, 0.0, 0.0, 50.0, 0.0, 0.0), 1);
    model.observe(&scan(2, 0.0, 0.0, 50.0, 0.0, 0.0), 1);
    model.observe(&scan(4, 0.0, 0.0, 48.0, 0.0, 0.0), 2);
    assert_eq!(model.snapshot().fired_recently(2).map(|r| r.id), Some(4));
    assert!(model.snapshot().fired_recently(3).is_none());
}

// ---- ThreatMap ----

fn grid_5x5() -> ThreatMap {
    ThreatMap::new(Arena::new(800.0, 600.0), 5, 5, BULLET_DANGER_LEVEL)
}

#[test]
fn test_cell_of_is_total_and_clamped() {
    let map = grid_5x5();
    assert_eq!(map.cell_of(Point::new(0.0, 0.0)), CellIndex::new(0, 0));
    assert_eq!(map.cell_of(Point::new(800.0, 600.0)), CellIndex::new(4, 4));
    assert_eq!(map.cell_of(Point::new(-50.0, -1.0)), CellIndex::new(0, 0));
    assert_eq!(map.cell_of(Point::new(1e12, f64::NAN)), CellIndex::new(0, 4));
    assert_eq!(map.cell_of(Point::new(500.0, 300.0)), CellIndex::new(2, 3));
    // idempotent
    let p = Point::new(333.0, 444.0);
    assert_eq!(map.cell_of(p), map.cell_of(p));
}

#[test]
fn test_hit_raises_only_its_cell() {
    let mut map = grid_5x5();
    let model = EnemyModel::new();
    let before = map.danger_snapshot(&model.snapshot());

    let cell = map.record_hit(Point::new(500.0, 300.0));
    assert_eq!(cell, CellIndex::new(2, 3));

    let after = map.danger_snapshot(&model.snapshot());
    for (c, danger) in after.iter() {
        if c == cell {
            assert!(approx(danger - before.get(c).unwrap(), BULLET_DANGER_LEVEL));
        } else {
            assert_eq!(danger, before.get(c).unwrap());
        }
    }
}

#[test]
fn test_persistent_layer_is_monotonic_until_reset() {
    let mut map = grid_5x5();
    let cell = CellIndex::new(1, 1);
    let mut last = map.persistent(cell).unwrap();
    for _ in 0..5 {
        map.record_hit(Point::new(200.0, 150.0));
        assert!(map.persistent(cell).unwrap() > last);
        last = map.persistent(cell).unwrap();
    }
    map.reset();
    assert_eq!(map.persistent(cell), Some(0.0));
}

#[test]
fn test_transient_layer_does_not_accumulate() {
    let map = grid_5x5();
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 10.0, 10.0, 80.0, 0.0, 0.0), 1);
    model.observe(&scan(2, 20.0, 20.0, 20.0, 0.0, 0.0), 1);
    let first = map.danger_snapshot(&model.snapshot());
    let second = map.danger_snapshot(&model.snapshot());
    assert_eq!(first, second);
    assert!(approx(first.get(CellIndex::new(0, 0)).unwrap(), 100.0));

    // enemy moves away: old cell forgets it
    model.observe(&scan(1, 790.0, 590.0, 80.0, 0.0, 0.0), 2);
    let moved = map.danger_snapshot(&model.snapshot());
    assert!(approx(moved.get(CellIndex::new(0, 0)).unwrap(), 20.0));
    assert!(approx(moved.get(CellIndex::new(4, 4)).unwrap(), 80.0));
}

#[test]
fn test_safest_cell_breaks_ties_row_major() {
    let mut map = grid_5x5();
    let mut model = EnemyModel::new();
    assert_eq!(map.safest_cell(&model.snapshot()), CellIndex::new(0, 0));

    model.observe(&scan(1, 10.0, 10.0, 5.0, 0.0, 0.0), 1);
    assert_eq!(map.safest_cell(&model.snapshot()), CellIndex::new(0, 1));

    map.record_hit(Point::new(200.0, 10.0));
    assert_eq!(map.safest_cell(&model.snapshot()), CellIndex::new(0, 2));
}

#[test]
fn test_cells_outside_the_grid_have_no_danger() {
    let mut map = grid_5x5();
    map.record_hit(Point::new(10.0, 10.0));
    assert_eq!(map.persistent(CellIndex::new(0, 0)), Some(BULLET_DANGER_LEVEL));
    // (0, 7) would alias (1, 2) in a flat 5x5 layout
    assert_eq!(map.persistent(CellIndex::new(0, 7)), None);
    assert_eq!(map.persistent(CellIndex::new(5, 0)), None);

    let grid = map.danger_snapshot(&EnemyModel::new().snapshot());
    assert_eq!(grid.get(CellIndex::new(4, 4)), Some(0.0));
    assert_eq!(grid.get(CellIndex::new(4, 5)), None);
}

#[test]
fn test_jitter_stays_within_quarter_cell() {
    let map = grid_5x5();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let cell = CellIndex::new(2, 3);
    let center = map.cell_center(cell);
    assert_eq!(center, Point::new(560.0, 300.0));
    for _ in 0..1000 {
        let p = map.jittered_point_in(cell, &mut rng);
        assert!((p.x - center.x).abs() <= 40.0);
        assert!((p.y - center.y).abs() <= 30.0);
        assert_eq!(map.cell_of(p), cell);
    }
}

// ---- Targeting ----

#[test]
fn test_low_energy_beats_equal_distance() {
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 300.0, 0.0, 100.0, 0.0, 0.0), 1);
    model.observe(&scan(2, 0.0, 300.0, 10.0, 0.0, 0.0), 1);
    let snap = model.snapshot();
    let target = select_target(&snap, Point::ZERO, &TargetWeights::default()).unwrap();
    assert_eq!(target.id, 2);
}

#[test]
fn test_empty_snapshot_has_no_target() {
    let model = EnemyModel::new();
    assert!(select_target(&model.snapshot(), Point::ZERO, &TargetWeights::default()).is_none());
    assert!(pick(&TargetPolicy::MostRecent, &model.snapshot(), Point::ZERO).is_none());
}

#[test]
fn test_unmeasurable_distance_is_never_selected() {
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 300.0, 0.0, 100.0, 0.0, 0.0), 1);
    let snap = model.snapshot();
    let lost = Point::new(f64::NAN, 0.0);
    assert!(select_target(&snap, lost, &TargetWeights::default()).is_none());
}

#[test]
fn test_selected_target_has_max_score() {
    let mut model = EnemyModel::new();
    let enemies = [
        (1, 50.0, 40.0, 70.0),
        (2, 400.0, 300.0, 12.0),
        (3, 700.0, 10.0, 3.0),
        (4, 120.0, 500.0, 45.0),
    ];
    for (id, x, y, e) in enemies {
        model.observe(&scan(id, x, y, e, 0.0, 0.0), 1);
    }
    let snap = model.snapshot();
    let me = Point::new(400.0, 250.0);
    let weights = TargetWeights::default();
    let best = select_target(&snap, me, &weights).unwrap();
    assert!(snap.contains(best.id));
    let best_score = target_score(best, me, &weights);
    for r in snap.iter() {
        assert!(best_score >= target_score(r, me, &weights));
    }
}

#[test]
fn test_degenerate_distance_and_energy_are_floored() {
    let r = record(1, 0.0, 0.0, 0.0);
    let score = target_score(&r, Point::ZERO, &TargetWeights::default());
    assert!(score.is_finite());
    assert!(score > 0.0);
}

#[test]
fn test_equal_scores_keep_first_id() {
    let mut model = EnemyModel::new();
    model.observe(&scan(8, 100.0, 0.0, 50.0, 0.0, 0.0), 1);
    model.observe(&scan(3, 0.0, 100.0, 50.0, 0.0, 0.0), 1);
    let snap = model.snapshot();
    let t = select_target(&snap, Point::ZERO, &TargetWeights::default()).unwrap();
    assert_eq!(t.id, 3);
}

// ---- InterceptPredictor ----

#[test]
fn test_bullet_speed_rule() {
    assert!(approx(bullet_speed(1.0), 17.0));
    assert!(approx(bullet_speed(3.0), 11.0));
    assert!(approx(bullet_speed(9.0), 11.0));
    assert!(approx(bullet_speed(0.0), 19.7));
    assert_eq!(travel_time(10.0, 0.0), f64::INFINITY);
}

#[test]
fn test_prediction_leads_moving_target() {
    let mut model = EnemyModel::new();
    let target = model
        .observe(&scan(1, 100.0, 0.0, 50.0, 90.0, 8.0), 1)
        .unwrap()
        .clone();
    let p = predict(Point::ZERO, &target, 20.0);
    assert!(approx(p.travel_time, 5.0));
    assert!(approx(p.aim.x, 100.0));
    assert!(approx(p.aim.y, 40.0));
}

#[test]
fn test_prediction_of_stationary_target_is_its_position() {
    let target = record(1, 300.0, 400.0, 50.0);
    let p = predict(Point::new(10.0, 10.0), &target, bullet_speed(2.0));
    assert_eq!(p.aim, target.position);
}

#[test]
fn test_reversing_target_is_led_backwards() {
    let mut model = EnemyModel::new();
    let target = model
        .observe(&scan(1, 200.0, 0.0, 50.0, 0.0, -4.0), 1)
        .unwrap()
        .clone();
    let p = predict(Point::ZERO, &target, 20.0);
    assert!(p.aim.x < 200.0);
}

// ---- FirepowerOptimizer ----

#[test]
fn test_damage_rule() {
    assert!(approx(bullet_damage(0.5), 2.0));
    assert!(approx(bullet_damage(1.0), 4.0));
    assert!(approx(bullet_damage(3.0), 16.0));
}

#[test]
fn test_candidate_grid() {
    let all: Vec<f64> = candidates(100.0, MAX_FIREPOWER).collect();
    assert_eq!(all.len(), 30);
    assert!(approx(all[0], 0.1));
    assert!(approx(all[29], 3.0));

    let poor: Vec<f64> = candidates(1.05, MAX_FIREPOWER).collect();
    assert_eq!(poor.len(), 10);
    assert!(approx(*poor.last().unwrap(), 1.0));

    assert_eq!(candidates(0.05, MAX_FIREPOWER).count(), 0);
    assert_eq!(candidates(100.0, 1.5).count(), 15);
}

#[test]
fn test_long_range_prefers_moderate_power() {
    let arena = Arena::new(800.0, 600.0);
    let params = OptimizerParams::default();
    let target = record(1, 400.0, 0.0, 3.0);
    let choice = choose_firepower(&target, 400.0, 100.0, &arena, &params).unwrap();

    let ctx = ShotContext::new(&target, 400.0, &arena);
    let max_shot = evaluate(&ctx, MAX_FIREPOWER, params.decay);
    assert!(choice.firepower < MAX_FIREPOWER);
    assert!(choice.firepower <= 2.5, "chose {}", choice.firepower);
    assert!(choice.expected_value > max_shot.expected_value);
}

#[test]
fn test_choice_is_deterministic_and_optimal() {
    let arena = Arena::default();
    let params = OptimizerParams::default();
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 150.0, 100.0, 40.0, 0.0, 2.0), 1);
    let target = model
        .observe(&scan(1, 152.0, 100.0, 40.0, 20.0, 3.0), 2)
        .unwrap()
        .clone();

    let a = choose_firepower(&target, 180.0, 50.0, &arena, &params).unwrap();
    let b = choose_firepower(&target, 180.0, 50.0, &arena, &params).unwrap();
    assert_eq!(a, b);

    let ctx = ShotContext::new(&target, 180.0, &arena);
    for fp in candidates(50.0, params.cap) {
        assert!(a.expected_value >= evaluate(&ctx, fp, params.decay).expected_value);
    }
}

#[test]
fn test_unpredictable_target_gets_minimum_shot() {
    let arena = Arena::default();
    let mut target = record(1, 100.0, 100.0, 50.0);
    target.erraticness = 1.0;
    let choice =
        choose_firepower(&target, 100.0, 100.0, &arena, &OptimizerParams::default()).unwrap();
    assert!(approx(choice.firepower, MIN_FIREPOWER));
    assert!(choice.expected_value < 0.0);
}

#[test]
fn test_no_energy_no_shot() {
    let target = record(1, 100.0, 100.0, 50.0);
    let params = OptimizerParams::default();
    assert!(choose_firepower(&target, 100.0, 0.05, &Arena::default(), &params).is_none());
    assert!(firepower::resolve(
        &FirepowerPolicy::Fixed { power: 3.0 },
        &target,
        100.0,
        0.05,
        &Arena::default(),
        &params
    )
    .is_none());
}

#[test]
fn test_policy_resolution() {
    let arena = Arena::default();
    let params = OptimizerParams::default();
    let target = record(1, 0.0, 0.0, 50.0);
    let bands = FirepowerPolicy::DistanceBands {
        bands: vec![
            DistanceBand {
                within: 200.0,
                power: 3.0,
            },
            DistanceBand {
                within: 500.0,
                power: 2.0,
            },
        ],
        fallback: 1.0,
        edge: BandEdge::Inclusive,
    };
    let fp = |policy: &FirepowerPolicy, distance: f64, energy: f64| {
        firepower::resolve(policy, &target, distance, energy, &arena, &params).map(|c| c.firepower)
    };
    assert_eq!(fp(&bands, 150.0, 100.0), Some(3.0));
    assert_eq!(fp(&bands, 300.0, 100.0), Some(2.0));
    assert_eq!(fp(&bands, 600.0, 100.0), Some(1.0));
    assert_eq!(fp(&FirepowerPolicy::Fixed { power: 3.0 }, 100.0, 1.5), Some(1.5));
    assert_eq!(fp(&FirepowerPolicy::Hold, 100.0, 100.0), None);
}

#[test]
fn test_band_edge_decides_the_boundary() {
    let arena = Arena::default();
    let params = OptimizerParams::default();
    let target = record(1, 0.0, 0.0, 50.0);
    let bands = |edge| FirepowerPolicy::DistanceBands {
        bands: vec![
            DistanceBand {
                within: 200.0,
                power: 3.0,
            },
            DistanceBand {
                within: 500.0,
                power: 2.0,
            },
        ],
        fallback: 1.0,
        edge,
    };
    let fp = |policy: &FirepowerPolicy, distance: f64| {
        firepower::resolve(policy, &target, distance, 100.0, &arena, &params).map(|c| c.firepower)
    };
    assert_eq!(fp(&bands(BandEdge::Inclusive), 200.0), Some(3.0));
    assert_eq!(fp(&bands(BandEdge::Exclusive), 200.0), Some(2.0));
    assert_eq!(fp(&bands(BandEdge::Exclusive), 500.0), Some(1.0));
    assert_eq!(fp(&bands(BandEdge::Exclusive), 199.9), Some(3.0));
}

// ---- MovementPlanner ----

fn planner(mode: MovementMode) -> MovementPlanner {
    MovementPlanner::new(&EngineConfig {
        movement: mode,
        ..Default::default()
    })
}

fn plan_with(
    planner: &mut MovementPlanner,
    own: &OwnState,
    model: &EnemyModel,
    target_id: Option<u32>,
    enemy_fired: bool,
    rng: &mut ChaCha8Rng,
) -> Option<Maneuver> {
    let arena = Arena::new(800.0, 600.0);
    let map = grid_5x5();
    let snap = model.snapshot();
    let ctx = PlanContext {
        own,
        arena: &arena,
        threat_map: &map,
        enemies: &snap,
        target: target_id.and_then(|id| snap.get(id)),
    };
    planner.plan(&ctx, enemy_fired, rng)
}

#[test]
fn test_stealth_heads_for_safest_cell() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut p = planner(MovementMode::Stealth);
    let mut model = EnemyModel::new();
    // occupy the first cell so the second one is safest
    model.observe(&scan(1, 50.0, 50.0, 100.0, 0.0, 0.0), 1);
    let own = own_at(400.0, 300.0, 0.0);
    let m = plan_with(&mut p, &own, &model, None, false, &mut rng).unwrap();
    let dest = p.destination().unwrap();
    assert!((200.0..=280.0).contains(&dest.x), "{dest:?}");
    assert!((30.0..=90.0).contains(&dest.y), "{dest:?}");
    assert!(m.turn > -180.0 && m.turn <= 180.0);
    assert!(approx(m.distance, own.position().distance(dest)));
}

#[test]
fn test_stealth_waits_for_move_unless_interrupted() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut p = planner(MovementMode::Stealth);
    let model = EnemyModel::new();
    let mut own = own_at(400.0, 300.0, 0.0);
    own.distance_remaining = 120.0;
    assert!(plan_with(&mut p, &own, &model, None, false, &mut rng).is_none());
    p.on_collision();
    assert!(plan_with(&mut p, &own, &model, None, false, &mut rng).is_some());
    // interruption is consumed by the new plan
    assert!(plan_with(&mut p, &own, &model, None, false, &mut rng).is_none());
}

#[test]
fn test_aggressive_closes_then_sidesteps() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut p = planner(MovementMode::Aggressive);
    let mut model = EnemyModel::new();
    let own = own_at(100.0, 300.0, 0.0);

    model.observe(&scan(1, 600.0, 300.0, 50.0, 0.0, 0.0), 1);
    let far = plan_with(&mut p, &own, &model, Some(1), false, &mut rng).unwrap();
    assert!(far.turn.abs() <= HEADING_JITTER_DEGREES + 1e-9);
    assert!(approx(far.distance, AGGRESSIVE_MAX_ADVANCE));

    model.observe(&scan(1, 300.0, 300.0, 50.0, 0.0, 0.0), 2);
    let near = plan_with(&mut p, &own, &model, Some(1), false, &mut rng).unwrap();
    assert!((near.turn + 90.0).abs() <= HEADING_JITTER_DEGREES + 1e-9);
    assert!(approx(near.distance, AGGRESSIVE_LATERAL_STEP));

    assert!(plan_with(&mut p, &own, &model, None, false, &mut rng).is_none());
}

#[test]
fn test_strafe_bands_and_collision_reversal() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut p = planner(MovementMode::Strafe);
    let mut model = EnemyModel::new();
    let own = own_at(100.0, 300.0, 0.0);

    model.observe(&scan(1, 700.0, 300.0, 50.0, 0.0, 0.0), 1);
    let far = plan_with(&mut p, &own, &model, Some(1), false, &mut rng).unwrap();
    assert!(approx(far.turn.abs(), STRAFE_APPROACH_OFFSET));
    assert!(approx(far.distance, STRAFE_FAR_ADVANCE));

    model.observe(&scan(1, 150.0, 300.0, 50.0, 0.0, 0.0), 2);
    let near = plan_with(&mut p, &own, &model, Some(1), false, &mut rng).unwrap();
    assert!(approx(near.distance.abs(), STRAFE_NEAR_ADVANCE));
    assert!(approx(near.turn.abs(), 90.0));

    let dir = p.strafe_direction();
    p.on_collision();
    assert_eq!(p.strafe_direction(), -dir);

    model.observe(&scan(1, 400.0, 300.0, 50.0, 0.0, 0.0), 3);
    let mid = plan_with(&mut p, &own, &model, Some(1), false, &mut rng).unwrap();
    assert!(approx(mid.turn, 90.0));
    assert!(approx(mid.distance.abs(), STRAFE_MID_ADVANCE));
    assert_eq!(mid.distance.signum(), p.strafe_direction());
}

#[test]
fn test_high_ground_climbs_then_evades() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut p = planner(MovementMode::HighGround);
    let model = EnemyModel::new();

    let low = own_at(100.0, 100.0, 0.0);
    let climb = plan_with(&mut p, &low, &model, None, false, &mut rng).unwrap();
    assert!(approx(climb.turn, 90.0));
    assert!(approx(climb.distance, 500.0));

    let top_left = own_at(100.0, 580.0, 0.0);
    assert!(plan_with(&mut p, &top_left, &model, None, false, &mut rng).is_none());
    let dodge = plan_with(&mut p, &top_left, &model, None, true, &mut rng).unwrap();
    assert!(approx(dodge.distance, HIGH_GROUND_EVADE_DISTANCE));

    let top_right = own_at(700.0, 580.0, 0.0);
    let dodge = plan_with(&mut p, &top_right, &model, None, true, &mut rng).unwrap();
    assert!(approx(dodge.distance, -HIGH_GROUND_EVADE_DISTANCE));

    let tilted = own_at(300.0, 580.0, 45.0);
    let square_up = plan_with(&mut p, &tilted, &model, None, false, &mut rng).unwrap();
    assert!(approx(square_up.turn, -45.0));
    assert_eq!(square_up.distance, 0.0);
}

#[test]
fn test_hold_never_moves() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut p = planner(MovementMode::Hold);
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 10.0, 10.0, 50.0, 0.0, 0.0), 1);
    let own = own_at(400.0, 300.0, 0.0);
    assert!(plan_with(&mut p, &own, &model, Some(1), true, &mut rng).is_none());
}

#[test]
fn test_non_finite_maneuver_is_dropped() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut p = planner(MovementMode::Aggressive);
    let mut model = EnemyModel::new();
    model.observe(&scan(1, 600.0, 300.0, 50.0, 0.0, 0.0), 1);
    let confused = own_at(100.0, 300.0, f64::NAN);
    assert!(plan_with(&mut p, &confused, &model, Some(1), false, &mut rng).is_none());
    let own = own_at(100.0, 300.0, 0.0);
    assert!(plan_with(&mut p, &own, &model, Some(1), false, &mut rng).is_some());
}
