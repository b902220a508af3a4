//! Engine configuration.
//!
//! Every tunable of the decision engine lives here so that strategy variants
//! are plain data. Missing fields in a serialized config take the defaults
//! from `constants`.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::MovementMode;
use crate::error::{ConfigError, Result};
use crate::types::Arena;

/// Weights of the target score `distance_weight / distance + energy_weight / energy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetWeights {
    pub distance: f64,
    pub energy: f64,
}

impl Default for TargetWeights {
    fn default() -> Self {
        Self {
            distance: TARGET_DISTANCE_WEIGHT,
            energy: TARGET_ENERGY_WEIGHT,
        }
    }
}

/// How a target is picked among known enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TargetPolicy {
    /// Highest weighted score.
    Scored(TargetWeights),
    /// Whoever was scanned last.
    MostRecent,
}

impl Default for TargetPolicy {
    fn default() -> Self {
        TargetPolicy::Scored(TargetWeights::default())
    }
}

/// Use `power` when the target is at most `within` units away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBand {
    pub within: f64,
    pub power: f64,
}

/// Whether a target exactly `within` units away still belongs to the band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandEdge {
    #[default]
    Inclusive,
    Exclusive,
}

impl BandEdge {
    pub fn admits(self, distance: f64, within: f64) -> bool {
        match self {
            BandEdge::Inclusive => distance <= within,
            BandEdge::Exclusive => distance < within,
        }
    }
}

/// How shot strength is chosen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FirepowerPolicy {
    /// Expected-value search over discrete candidates.
    #[default]
    Optimized,
    /// Always the same strength.
    Fixed { power: f64 },
    /// First band (ascending) containing the distance, else `fallback`.
    DistanceBands {
        bands: Vec<DistanceBand>,
        fallback: f64,
        #[serde(default)]
        edge: BandEdge,
    },
    /// Never fire.
    Hold,
}

/// Parameters of the firepower search and its hit-probability model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerParams {
    /// Highest candidate considered, further limited by own energy.
    pub cap: f64,
    /// Travel-time decay constant λ in `exp(-λ * travel_time)`.
    pub decay: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            cap: MAX_FIREPOWER,
            decay: TRAVEL_TIME_DECAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggressiveParams {
    pub engage_range: f64,
    pub standoff: f64,
    pub max_advance: f64,
    pub lateral_step: f64,
}

impl Default for AggressiveParams {
    fn default() -> Self {
        Self {
            engage_range: AGGRESSIVE_ENGAGE_RANGE,
            standoff: AGGRESSIVE_STANDOFF,
            max_advance: AGGRESSIVE_MAX_ADVANCE,
            lateral_step: AGGRESSIVE_LATERAL_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrafeParams {
    pub far_range: f64,
    pub near_range: f64,
    pub approach_offset: f64,
    pub far_advance: f64,
    pub near_advance: f64,
    pub mid_advance: f64,
    pub flip_chance: f64,
}

impl Default for StrafeParams {
    fn default() -> Self {
        Self {
            far_range: STRAFE_FAR_RANGE,
            near_range: STRAFE_NEAR_RANGE,
            approach_offset: STRAFE_APPROACH_OFFSET,
            far_advance: STRAFE_FAR_ADVANCE,
            near_advance: STRAFE_NEAR_ADVANCE,
            mid_advance: STRAFE_MID_ADVANCE,
            flip_chance: STRAFE_FLIP_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighGroundParams {
    /// Fraction of the arena height that counts as holding the top.
    pub top_fraction: f64,
    pub evade_distance: f64,
}

impl Default for HighGroundParams {
    fn default() -> Self {
        Self {
            top_fraction: HIGH_GROUND_FRACTION,
            evade_distance: HIGH_GROUND_EVADE_DISTANCE,
        }
    }
}

/// Full configuration of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub arena: Arena,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Persistent danger added per hit taken.
    pub hit_danger: f64,
    pub target: TargetPolicy,
    pub firepower: FirepowerPolicy,
    pub optimizer: OptimizerParams,
    /// Aim at the extrapolated intercept point instead of the last known position.
    pub lead_prediction: bool,
    pub movement: MovementMode,
    /// Bound of random heading perturbation on maneuvers (degrees).
    pub heading_jitter: f64,
    pub aggressive: AggressiveParams,
    pub strafe: StrafeParams,
    pub high_ground: HighGroundParams,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            hit_danger: BULLET_DANGER_LEVEL,
            target: TargetPolicy::default(),
            firepower: FirepowerPolicy::default(),
            optimizer: OptimizerParams::default(),
            lead_prediction: true,
            movement: MovementMode::default(),
            heading_jitter: HEADING_JITTER_DEGREES,
            aggressive: AggressiveParams::default(),
            strafe: StrafeParams::default(),
            high_ground: HighGroundParams::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Check that every parameter is usable by the engine.
    pub fn validate(&self) -> Result<()> {
        let Arena { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.grid_rows,
                cols: self.grid_cols,
            });
        }

        non_negative("hit_danger", self.hit_danger)?;
        non_negative("heading_jitter", self.heading_jitter)?;
        if let TargetPolicy::Scored(w) = self.target {
            non_negative("target.distance", w.distance)?;
            non_negative("target.energy", w.energy)?;
        }

        match &self.firepower {
            FirepowerPolicy::Fixed { power } => firepower_in_range(*power)?,
            FirepowerPolicy::DistanceBands { bands, fallback, .. } => {
                firepower_in_range(*fallback)?;
                for band in bands {
                    non_negative("band.within", band.within)?;
                    firepower_in_range(band.power)?;
                }
                if bands.windows(2).any(|w| w[0].within > w[1].within) {
                    return Err(ConfigError::UnsortedBands);
                }
            }
            FirepowerPolicy::Optimized | FirepowerPolicy::Hold => {}
        }

        firepower_in_range(self.optimizer.cap)?;
        positive("optimizer.decay", self.optimizer.decay)?;

        non_negative("aggressive.engage_range", self.aggressive.engage_range)?;
        non_negative("aggressive.standoff", self.aggressive.standoff)?;
        positive("aggressive.max_advance", self.aggressive.max_advance)?;
        positive("aggressive.lateral_step", self.aggressive.lateral_step)?;

        non_negative("strafe.near_range", self.strafe.near_range)?;
        non_negative("strafe.far_range", self.strafe.far_range)?;
        if !(0.0..=1.0).contains(&self.strafe.flip_chance) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: "strafe.flip_chance",
                value: self.strafe.flip_chance,
            });
        }

        positive("high_ground.top_fraction", self.high_ground.top_fraction)?;
        positive("high_ground.evade_distance", self.high_ground.evade_distance)?;
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeParameter { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveParameter { name, value })
    }
}

fn firepower_in_range(value: f64) -> Result<()> {
    if (MIN_FIREPOWER..=MAX_FIREPOWER).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FirepowerOutOfRange {
            value,
            min: MIN_FIREPOWER,
            max: MAX_FIREPOWER,
        })
    }
}
