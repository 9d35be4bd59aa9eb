#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Math Defence session.

mod autopilot;
mod config;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use math_defence_core::WELCOME_BANNER;
use math_defence_simulation::{Simulation, SimulationConfig};
use math_defence_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{autopilot::Autopilot, config::SessionConfig, summary::RunSummary};

#[derive(Parser, Debug)]
#[command(name = "math-defence")]
#[command(about = "Runs a scripted Math Defence session and prints a summary")]
struct Cli {
    /// TOML file providing the session configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for every random decision in the session
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulation steps to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Probability that the scripted player answers a challenge correctly
    #[arg(long)]
    accuracy: Option<f64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(accuracy) = self.accuracy {
            config.autoplay.accuracy = accuracy;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Entry point for the Math Defence command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let config = cli.session_config()?;

    println!("{WELCOME_BANNER}");
    info!(seed = config.seed, ticks = config.ticks, "session starting");

    let mut simulation = Simulation::new(SimulationConfig::new(config.seed));
    let mut autopilot = Autopilot::new(config.autoplay.clone(), config.seed);
    let mut summary = RunSummary::default();
    let dt = config.tick();
    let mut events = Vec::new();

    for tick in 0..config.ticks {
        simulation.step(dt, &mut events);
        autopilot.act(tick, &mut simulation, &mut events);
        summary.record(&events);
        events.clear();

        if query::is_defeated(simulation.world()) {
            break;
        }
    }

    summary.finish(&simulation.frame());
    info!(level = query::wave(simulation.world()).level, "session finished");
    println!("{summary}");
    Ok(())
}
