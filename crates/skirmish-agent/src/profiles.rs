//! Variant presets.
//!
//! Every shipped strategy is the same engine with a different configuration.

use skirmish_core::config::*;
use skirmish_core::enums::{MovementMode, Variant};

/// Get the engine configuration for a given variant.
pub fn get_profile(variant: Variant) -> EngineConfig {
    match variant {
        Variant::Canonical => EngineConfig::default(),
        Variant::Stealth => EngineConfig {
            movement: MovementMode::Stealth,
            firepower: FirepowerPolicy::Fixed { power: 3.0 },
            lead_prediction: false,
            ..Default::default()
        },
        Variant::Seeker => EngineConfig {
            movement: MovementMode::Aggressive,
            firepower: FirepowerPolicy::DistanceBands {
                bands: vec![DistanceBand {
                    within: 300.0,
                    power: 3.0,
                }],
                fallback: 1.0,
                edge: BandEdge::Inclusive,
            },
            ..Default::default()
        },
        Variant::Strafer => EngineConfig {
            movement: MovementMode::Strafe,
            target: TargetPolicy::MostRecent,
            firepower: FirepowerPolicy::DistanceBands {
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
                edge: BandEdge::Exclusive,
            },
            ..Default::default()
        },
        Variant::HighGround => EngineConfig {
            movement: MovementMode::HighGround,
            target: TargetPolicy::MostRecent,
            firepower: FirepowerPolicy::Fixed { power: 3.0 },
            lead_prediction: false,
            ..Default::default()
        },
        Variant::Idle => EngineConfig {
            movement: MovementMode::Hold,
            firepower: FirepowerPolicy::Hold,
            ..Default::default()
        },
    }
}
