//! Movement planning.
//!
//! Each mode turns the current picture (own state, threat map, selected
//! target) into at most one maneuver: a relative body turn followed by a
//! straight drive. Turns are always the short way round.

use rand::Rng;

use skirmish_core::commands::Maneuver;
use skirmish_core::config::{AggressiveParams, EngineConfig, HighGroundParams, StrafeParams};
use skirmish_core::enums::MovementMode;
use skirmish_core::events::OwnState;
use skirmish_core::types::{bearing_to, normalize_relative_angle, Arena, Point};

use crate::enemy_model::{EnemyRecord, EnemySnapshot};
use crate::threat_map::ThreatMap;

/// What the planner may look at this tick.
pub struct PlanContext<'a, 'b> {
    pub own: &'a OwnState,
    pub arena: &'a Arena,
    pub threat_map: &'a ThreatMap,
    pub enemies: &'a EnemySnapshot<'b>,
    pub target: Option<&'b EnemyRecord>,
}

/// Turn to face `to`, then drive the whole distance.
pub fn maneuver_to(own: &OwnState, to: Point) -> Maneuver {
    Maneuver {
        turn: bearing_to(own.position(), own.heading, to),
        distance: own.position().distance(to),
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Movement state carried across ticks: the current destination, the strafe
/// direction, and whether the last move was cut short by a collision.
#[derive(Debug, Clone)]
pub struct MovementPlanner {
    mode: MovementMode,
    heading_jitter: f64,
    aggressive: AggressiveParams,
    strafe: StrafeParams,
    high_ground: HighGroundParams,
    strafe_direction: f64,
    destination: Option<Point>,
    interrupted: bool,
}

impl MovementPlanner {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            mode: config.movement,
            heading_jitter: config.heading_jitter,
            aggressive: config.aggressive,
            strafe: config.strafe,
            high_ground: config.high_ground,
            strafe_direction: 1.0,
            destination: None,
            interrupted: false,
        }
    }

    /// Last destination chosen in stealth mode.
    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    pub fn strafe_direction(&self) -> f64 {
        self.strafe_direction
    }

    /// We hit a wall or another bot: reverse the strafe and allow a fresh plan.
    pub fn on_collision(&mut self) {
        self.strafe_direction = -self.strafe_direction;
        self.interrupted = true;
    }

    pub fn reset(&mut self) {
        self.strafe_direction = 1.0;
        self.destination = None;
        self.interrupted = false;
    }

    /// `true` while the previous move is still running and nothing cut it short.
    fn busy(&self, own: &OwnState) -> bool {
        own.distance_remaining.abs() > 0.0 && !self.interrupted
    }

    /// Plan this tick's maneuver. `enemy_fired` is only read by high-ground mode.
    pub fn plan<R: Rng + ?Sized>(
        &mut self,
        ctx: &PlanContext<'_, '_>,
        enemy_fired: bool,
        rng: &mut R,
    ) -> Option<Maneuver> {
        let plan = match self.mode {
            MovementMode::Hold => None,
            MovementMode::Stealth => self.plan_stealth(ctx, rng),
            MovementMode::Aggressive => self.plan_aggressive(ctx, rng),
            MovementMode::Strafe => self.plan_strafe(ctx, rng),
            MovementMode::HighGround => self.plan_high_ground(ctx, enemy_fired),
        }
        .filter(|m| m.turn.is_finite() && m.distance.is_finite());
        if plan.is_some() {
            self.interrupted = false;
        }
        plan
    }

    fn plan_stealth<R: Rng + ?Sized>(
        &mut self,
        ctx: &PlanContext<'_, '_>,
        rng: &mut R,
    ) -> Option<Maneuver> {
        if self.busy(ctx.own) {
            return None;
        }
        let cell = ctx.threat_map.safest_cell(ctx.enemies);
        let point = ctx.arena.clamp(ctx.threat_map.jittered_point_in(cell, rng));
        self.destination = Some(point);

        let mut m = maneuver_to(ctx.own, point);
        m.turn = normalize_relative_angle(m.turn + jitter(rng, self.heading_jitter));
        tracing::debug!(
            row = cell.row,
            col = cell.col,
            x = point.x,
            y = point.y,
            "stealth destination"
        );
        Some(m)
    }

    fn plan_aggressive<R: Rng + ?Sized>(
        &mut self,
        ctx: &PlanContext<'_, '_>,
        rng: &mut R,
    ) -> Option<Maneuver> {
        let target = ctx.target?;
        if self.busy(ctx.own) {
            return None;
        }
        let p = &self.aggressive;
        let distance = target.distance_to(ctx.own.position());
        let bearing = bearing_to(ctx.own.position(), ctx.own.heading, target.position);
        let wobble = jitter(rng, self.heading_jitter);

        let m = if distance > p.engage_range {
            Maneuver {
                turn: normalize_relative_angle(bearing + wobble),
                distance: (distance - p.standoff).clamp(0.0, p.max_advance),
            }
        } else {
            Maneuver {
                turn: normalize_relative_angle(bearing - 90.0 + wobble),
                distance: p.lateral_step,
            }
        };
        Some(m)
    }

    fn plan_strafe<R: Rng + ?Sized>(
        &mut self,
        ctx: &PlanContext<'_, '_>,
        rng: &mut R,
    ) -> Option<Maneuver> {
        let p = self.strafe;
        let Some(target) = ctx.target else {
            // keep the strafe going until something shows up on radar
            if self.busy(ctx.own) {
                return None;
            }
            return Some(Maneuver {
                turn: 0.0,
                distance: p.mid_advance * self.strafe_direction,
            });
        };

        let distance = target.distance_to(ctx.own.position());
        let bearing = bearing_to(ctx.own.position(), ctx.own.heading, target.position);

        let m = if distance > p.far_range {
            let side = random_sign(rng);
            Maneuver {
                turn: normalize_relative_angle(bearing + side * p.approach_offset),
                distance: p.far_advance,
            }
        } else if distance < p.near_range {
            self.strafe_direction = random_sign(rng);
            Maneuver {
                turn: normalize_relative_angle(bearing + 90.0 * self.strafe_direction),
                distance: p.near_advance * self.strafe_direction,
            }
        } else {
            if rng.gen_bool(p.flip_chance) {
                self.strafe_direction = -self.strafe_direction;
            }
            Maneuver {
                turn: normalize_relative_angle(bearing + 90.0),
                distance: p.mid_advance * self.strafe_direction,
            }
        };
        Some(m)
    }

    fn plan_high_ground(&mut self, ctx: &PlanContext<'_, '_>, enemy_fired: bool) -> Option<Maneuver> {
        let own = ctx.own;
        let p = &self.high_ground;
        let top = ctx.arena.height * p.top_fraction;

        if own.y < top {
            if self.busy(own) {
                return None;
            }
            return Some(Maneuver {
                turn: normalize_relative_angle(90.0 - own.heading),
                distance: ctx.arena.height - own.y,
            });
        }

        let face_east = normalize_relative_angle(-own.heading);
        if enemy_fired {
            let distance = if own.x < ctx.arena.width / 2.0 {
                p.evade_distance
            } else {
                -p.evade_distance
            };
            tracing::debug!(distance, "evading detected shot");
            return Some(Maneuver {
                turn: face_east,
                distance,
            });
        }
        if face_east != 0.0 && !self.busy(own) {
            return Some(Maneuver {
                turn: face_east,
                distance: 0.0,
            });
        }
        None
    }
}
