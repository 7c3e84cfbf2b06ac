//! Living Factions - Entry Point
//!
//! Runs the simulation headless for a fixed number of ticks and prints a
//! faction summary at regular intervals.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use living_factions::core::error::Result;
use living_factions::faction::FactionSnapshot;
use living_factions::host::{render_summary, TimeControl};
use living_factions::{Simulation, SimulationConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Headless faction foraging simulation
#[derive(Parser, Debug)]
#[command(name = "living-factions")]
#[command(about = "Run the faction foraging simulation without a renderer")]
struct Args {
    /// TOML config file; missing keys use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Frame time handed to each tick, before time scaling (seconds)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Override the config seed
    #[arg(long)]
    seed: Option<u64>,

    /// Speed multiplier; 0 pauses
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Print a summary every N ticks (0 = only at the end)
    #[arg(long, default_value_t = 600)]
    report_every: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct RunSummary {
    ticks: u64,
    elapsed_seconds: f64,
    seed: u64,
    agents: usize,
    factions: Vec<FactionSnapshot>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("living_factions=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut sim = Simulation::new(config)?;
    let mut time = TimeControl::new();
    time.set_time_scale(args.time_scale);
    if time.is_paused() {
        tracing::warn!("Time scale is 0 - agents will not move");
    }

    for tick in 1..=args.ticks {
        sim.tick(time.scaled_dt(args.dt));

        if args.format == OutputFormat::Text && args.report_every > 0 && tick % args.report_every == 0 {
            println!("{}", render_summary(&sim, &time));
        }
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_summary(&sim, &time)),
        OutputFormat::Json => {
            let summary = RunSummary {
                ticks: sim.current_tick,
                elapsed_seconds: sim.elapsed(),
                seed: sim.config().seed,
                agents: sim.agents.count(),
                factions: sim.list_factions(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
