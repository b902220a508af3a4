//! skirmish-replay: run a recorded tick script through one agent.
//!
//! Usage:
//!   skirmish-replay --script round.json --variant strafer --seed 7
//!   skirmish-replay --script round.json --config tuned.json
//!
//! Commands go to stdout as JSON lines; logs go to stderr (`RUST_LOG`).

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skirmish_core::enums::Variant;
use skirmish_replay::{build_agent, load_script, replay, write_lines};

#[derive(Parser)]
#[command(name = "skirmish-replay")]
#[command(about = "Replay a tick script through a SKIRMISH agent", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON script of tick inputs
    #[arg(long)]
    script: PathBuf,

    /// Strategy variant to run
    #[arg(long, default_value = "canonical", value_parser = parse_variant)]
    variant: Variant,

    /// Engine configuration file; takes precedence over --variant
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed override
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_name(s).ok_or_else(|| {
        let names: Vec<_> = Variant::ALL.iter().map(|v| v.name()).collect();
        format!("unknown variant '{s}' (expected one of: {})", names.join(", "))
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let script = load_script(&cli.script)?;
    let mut agent = build_agent(cli.variant, cli.config.as_deref(), cli.seed)?;
    tracing::info!(
        script = %cli.script.display(),
        ticks = script.ticks.len(),
        variant = cli.variant.name(),
        "replay starting"
    );

    let (lines, summary) = replay(&mut agent, &script);
    write_lines(&mut io::stdout().lock(), &lines)?;

    tracing::info!(
        ticks = summary.ticks,
        shots = summary.shots,
        firepower = summary.firepower_spent,
        maneuvers = summary.maneuvers,
        enemies_tracked = agent.enemies().len(),
        "replay finished"
    );
    Ok(())
}
