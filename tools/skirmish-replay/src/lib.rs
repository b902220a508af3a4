//! Replay a recorded sequence of tick inputs through one agent.
//!
//! Scripts are JSON: `{ "ticks": [TickInput, ...] }`. Each tick's decision is
//! flattened to actuator commands and emitted as one JSON line.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use skirmish_agent::profiles::get_profile;
use skirmish_agent::Agent;
use skirmish_core::commands::ActuatorCommand;
use skirmish_core::config::EngineConfig;
use skirmish_core::enums::Variant;
use skirmish_core::events::TickInput;
use skirmish_core::types::Tick;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    pub ticks: Vec<TickInput>,
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayLine {
    pub tick: Tick,
    pub commands: Vec<ActuatorCommand>,
}

/// Totals over a whole replay, independent of round boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub ticks: u64,
    pub shots: u32,
    pub firepower_spent: f64,
    pub maneuvers: u32,
}

pub fn load_script(path: &Path) -> Result<Script> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing script {}", path.display()))
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Build the agent from a config file if given, else from the named variant.
/// `seed` overrides whatever seed the configuration carries.
pub fn build_agent(variant: Variant, config: Option<&Path>, seed: Option<u64>) -> Result<Agent> {
    let mut engine = match config {
        Some(path) => load_config(path)?,
        None => get_profile(variant),
    };
    if seed.is_some() {
        engine.seed = seed;
    }
    Agent::new(engine).context("invalid engine configuration")
}

pub fn replay(agent: &mut Agent, script: &Script) -> (Vec<ReplayLine>, Summary) {
    let mut summary = Summary::default();
    let lines = script
        .ticks
        .iter()
        .map(|input| {
            let decision = agent.tick(input);
            summary.ticks += 1;
            if let Some(fire) = decision.fire {
                summary.shots += 1;
                summary.firepower_spent += fire.firepower;
            }
            if decision.maneuver.is_some() {
                summary.maneuvers += 1;
            }
            ReplayLine {
                tick: input.tick,
                commands: decision.to_commands(),
            }
        })
        .collect();
    (lines, summary)
}

pub fn write_lines<W: Write>(out: &mut W, lines: &[ReplayLine]) -> Result<()> {
    for line in lines {
        serde_json::to_writer(&mut *out, line)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
