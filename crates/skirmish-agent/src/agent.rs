//! The per-agent tick loop.
//!
//! `Agent` owns one enemy model, one threat map, one movement planner and one
//! RNG. Each call to `tick` consumes the host's event batch, runs the decision
//! pipeline and returns at most one maneuver and one shot. Completely headless
//! and, with a fixed seed, deterministic.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

use skirmish_core::commands::{FireOrder, TickCommands};
use skirmish_core::config::{EngineConfig, FirepowerPolicy};
use skirmish_core::constants::EPSILON;
use skirmish_core::enums::{AgentPhase, Variant};
use skirmish_core::error::Result;
use skirmish_core::events::{OwnState, SensorEvent, TickInput};
use skirmish_core::types::{bearing_to, Point, Tick};

use skirmish_tactics::enemy_model::{EnemyModel, EnemyRecord};
use skirmish_tactics::firepower;
use skirmish_tactics::intercept::{bullet_speed, predict};
use skirmish_tactics::movement::{MovementPlanner, PlanContext};
use skirmish_tactics::targeting;
use skirmish_tactics::threat_map::ThreatMap;

use crate::profiles::get_profile;

/// Running counters for the current round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RoundStats {
    pub ticks: u64,
    pub shots_fired: u32,
    pub energy_spent: f64,
    pub maneuvers: u32,
    pub hits_taken: u32,
    pub enemies_destroyed: u32,
}

/// One autonomous combatant.
pub struct Agent {
    config: EngineConfig,
    enemies: EnemyModel,
    threat_map: ThreatMap,
    planner: MovementPlanner,
    rng: ChaCha8Rng,
    phase: AgentPhase,
    last_tick: Tick,
    stats: RoundStats,
}

impl Agent {
    /// Build an agent from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            enemies: EnemyModel::new(),
            threat_map: ThreatMap::new(
                config.arena,
                config.grid_rows,
                config.grid_cols,
                config.hit_danger,
            ),
            planner: MovementPlanner::new(&config),
            rng,
            phase: AgentPhase::Idle,
            last_tick: 0,
            stats: RoundStats::default(),
            config,
        })
    }

    /// Build one of the shipped variants.
    pub fn from_variant(variant: Variant, seed: Option<u64>) -> Result<Self> {
        let mut config = get_profile(variant);
        config.seed = seed;
        Self::new(config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    pub fn enemies(&self) -> &EnemyModel {
        &self.enemies
    }

    pub fn threat_map(&self) -> &ThreatMap {
        &self.threat_map
    }

    pub fn planner(&self) -> &MovementPlanner {
        &self.planner
    }

    pub fn stats(&self) -> RoundStats {
        self.stats
    }

    /// Process one tick: apply events, decide, and return this tick's commands.
    pub fn tick(&mut self, input: &TickInput) -> TickCommands {
        self.last_tick = input.tick;
        self.enter(AgentPhase::Scanning);
        for event in &input.events {
            self.apply(event, input.tick);
        }
        if self.phase == AgentPhase::Ended {
            return TickCommands::default();
        }

        self.enter(AgentPhase::Deciding);
        let commands = self.decide(&input.own, input.tick);

        self.enter(AgentPhase::Acting);
        self.stats.ticks += 1;
        if let Some(fire) = commands.fire {
            self.stats.shots_fired += 1;
            self.stats.energy_spent += fire.firepower;
        }
        if commands.maneuver.is_some() {
            self.stats.maneuvers += 1;
        }
        self.enter(AgentPhase::Idle);
        commands
    }

    fn enter(&mut self, phase: AgentPhase) {
        // Ended is only left through a RoundStarted event
        if self.phase == AgentPhase::Ended {
            return;
        }
        trace!(tick = self.last_tick, from = ?self.phase, to = ?phase, "phase");
        self.phase = phase;
    }

    fn apply(&mut self, event: &SensorEvent, tick: Tick) {
        if self.phase == AgentPhase::Ended && !matches!(event, SensorEvent::RoundStarted) {
            return;
        }
        match event {
            SensorEvent::Scan(scan) => {
                self.enemies.observe(scan, tick);
            }
            SensorEvent::HitByBullet { x, y } => {
                self.threat_map.record_hit(Point::new(*x, *y));
                self.stats.hits_taken += 1;
            }
            SensorEvent::Death { victim_id } => {
                if self.enemies.remove(*victim_id).is_some() {
                    self.stats.enemies_destroyed += 1;
                    debug!(id = victim_id, "enemy destroyed");
                }
            }
            SensorEvent::HitWall | SensorEvent::HitBot { .. } => {
                self.planner.on_collision();
            }
            SensorEvent::RoundStarted => {
                self.reset_round();
                self.phase = AgentPhase::Scanning;
                info!(tick, "round started");
            }
            SensorEvent::RoundEnded => {
                info!(tick, stats = ?self.stats, "round ended");
                self.reset_round();
                self.phase = AgentPhase::Ended;
            }
        }
    }

    fn reset_round(&mut self) {
        self.enemies.clear();
        self.threat_map.reset();
        self.planner.reset();
        self.stats = RoundStats::default();
    }

    fn decide(&mut self, own: &OwnState, tick: Tick) -> TickCommands {
        let shooter = own.position();
        let snapshot = self.enemies.snapshot();
        let target = targeting::pick(&self.config.target, &snapshot, shooter);
        let fire = target.and_then(|t| fire_order(&self.config, own, t));

        let enemy_fired = snapshot.fired_recently(tick).is_some();
        let ctx = PlanContext {
            own,
            arena: &self.config.arena,
            threat_map: &self.threat_map,
            enemies: &snapshot,
            target,
        };
        let maneuver = self.planner.plan(&ctx, enemy_fired, &mut self.rng);

        TickCommands { maneuver, fire }
    }
}

/// Aim and size a shot at `target`, or skip it.
fn fire_order(config: &EngineConfig, own: &OwnState, target: &EnemyRecord) -> Option<FireOrder> {
    if !own.is_finite() {
        return None;
    }
    let shooter = own.position();
    let distance = target.distance_to(shooter);
    if !distance.is_finite() || distance < EPSILON {
        return None;
    }

    let choice = firepower::resolve(
        &config.firepower,
        target,
        distance,
        own.energy,
        &config.arena,
        &config.optimizer,
    )?;
    let ev = choice.expected_value;
    if matches!(config.firepower, FirepowerPolicy::Optimized) && (ev.is_nan() || ev <= 0.0) {
        debug!(id = target.id, ev, "no favorable firepower");
        return None;
    }

    let aim = if config.lead_prediction {
        config
            .arena
            .clamp(predict(shooter, target, bullet_speed(choice.firepower)).aim)
    } else {
        target.position
    };
    let gun_turn = bearing_to(shooter, own.gun_heading, aim);
    if !gun_turn.is_finite() {
        return None;
    }
    debug!(
        id = target.id,
        firepower = choice.firepower,
        hit_probability = choice.hit_probability,
        "fire"
    );
    Some(FireOrder {
        gun_turn,
        firepower: choice.firepower,
    })
}
