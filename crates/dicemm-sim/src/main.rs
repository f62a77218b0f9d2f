//! Dice derivatives market-making simulator - entry point.

mod config;
mod game;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::SimConfig;
use game::GameSim;

/// Turn-based dice game simulator for the quoting strategy
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via DICEMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the PRNG seed from the config file
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,dicemm=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    info!("Starting dicemm-sim v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > DICEMM_CONFIG env var > built-in defaults
    let config_path = args
        .config
        .or_else(|| std::env::var("DICEMM_CONFIG").ok());

    let mut config = match config_path {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            SimConfig::from_file(&path)?
        }
        None => {
            info!("No config file given, using defaults");
            SimConfig::default()
        }
    };
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }

    info!(
        rounds = config.sim.rounds,
        subrounds = config.sim.subrounds,
        dice_sides = config.game.dice_sides,
        seed = config.sim.seed,
        "Configuration loaded"
    );

    let summary = GameSim::new(config).run()?;
    info!(
        total_pnl = summary.total_pnl,
        final_score = summary.final_score,
        "Simulation finished"
    );

    Ok(())
}
