//! Host rules and tuning parameters.

// --- Host kinematics ---

/// Maximum speed of any bot (units per tick).
pub const MAX_SPEED: f64 = 8.0;

/// Minimum firepower the host accepts for a shot.
pub const MIN_FIREPOWER: f64 = 0.1;

/// Maximum firepower the host accepts for a shot.
pub const MAX_FIREPOWER: f64 = 3.0;

/// Bullet speed at zero firepower. Actual speed is `20 - 3 * firepower`.
pub const BULLET_BASE_SPEED: f64 = 20.0;

/// Bullet speed lost per unit of firepower.
pub const BULLET_SPEED_PER_POWER: f64 = 3.0;

// --- Arena ---

/// Default arena width (units).
pub const DEFAULT_ARENA_WIDTH: f64 = 800.0;

/// Default arena height (units).
pub const DEFAULT_ARENA_HEIGHT: f64 = 600.0;

// --- Numerics ---

/// Floor applied to distances and energies before dividing by them.
pub const EPSILON: f64 = 1e-6;

// --- Threat map ---

/// Default grid rows.
pub const GRID_ROWS: usize = 5;

/// Default grid columns.
pub const GRID_COLS: usize = 5;

/// Persistent danger added to a cell each time we are hit while in it.
pub const BULLET_DANGER_LEVEL: f64 = 20.0;

// --- Targeting ---

/// Default weight of the inverse-distance term.
pub const TARGET_DISTANCE_WEIGHT: f64 = 1.0;

/// Default weight of the inverse-energy term.
pub const TARGET_ENERGY_WEIGHT: f64 = 5.0;

// --- Firepower search ---

/// Step between firepower candidates.
pub const FIREPOWER_STEP: f64 = 0.1;

/// Travel-time decay constant (per tick of bullet flight).
pub const TRAVEL_TIME_DECAY: f64 = 0.03;

/// Lower bound of the target-speed factor in the hit model.
pub const MIN_SPEED_FACTOR: f64 = 0.1;

/// Energy drops outside this range between scans are not treated as shots.
pub const SHOT_ENERGY_DROP_MIN: f64 = MIN_FIREPOWER;
pub const SHOT_ENERGY_DROP_MAX: f64 = MAX_FIREPOWER;

// --- Movement ---

/// Bound of the random heading perturbation applied to maneuvers (degrees).
pub const HEADING_JITTER_DEGREES: f64 = 3.0;

/// Aggressive mode: beyond this distance, close in.
pub const AGGRESSIVE_ENGAGE_RANGE: f64 = 300.0;

/// Aggressive mode: preferred distance to stop at when closing.
pub const AGGRESSIVE_STANDOFF: f64 = 250.0;

/// Aggressive mode: longest single advance.
pub const AGGRESSIVE_MAX_ADVANCE: f64 = 100.0;

/// Aggressive mode: lateral step when inside engage range.
pub const AGGRESSIVE_LATERAL_STEP: f64 = 50.0;

/// Strafe mode: beyond this distance, approach at an angle.
pub const STRAFE_FAR_RANGE: f64 = 500.0;

/// Strafe mode: inside this distance, strafe in a random direction.
pub const STRAFE_NEAR_RANGE: f64 = 100.0;

/// Strafe mode: approach angle offset when far (degrees).
pub const STRAFE_APPROACH_OFFSET: f64 = 30.0;

/// Strafe mode: advance distances for far / near / mid range.
pub const STRAFE_FAR_ADVANCE: f64 = 200.0;
pub const STRAFE_NEAR_ADVANCE: f64 = 150.0;
pub const STRAFE_MID_ADVANCE: f64 = 100.0;

/// Strafe mode: probability of reversing direction at mid range.
pub const STRAFE_FLIP_CHANCE: f64 = 0.3;

/// High-ground mode: fraction of arena height considered "the top".
pub const HIGH_GROUND_FRACTION: f64 = 0.9;

/// High-ground mode: evasion distance after an enemy fires.
pub const HIGH_GROUND_EVADE_DISTANCE: f64 = 300.0;
