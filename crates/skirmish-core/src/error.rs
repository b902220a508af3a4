//! Configuration errors.
//!
//! The decision path itself never fails: missing data and degenerate numbers
//! degrade to "no action this tick". Only building an engine from a bad
//! configuration is rejected.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena must have positive size, got {width}x{height}")]
    InvalidArena { width: f64, height: f64 },

    #[error("threat grid needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f64 },

    #[error("{name} must be finite and positive, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },

    #[error("firepower {value} is outside the host range [{min}, {max}]")]
    FirepowerOutOfRange { value: f64, min: f64, max: f64 },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("distance bands must be sorted by ascending range")]
    UnsortedBands,
}
