//! arena_sim - Headless arena match driver for augment loadouts

mod simulation;

use anyhow::{Context, Result};
use augment_core::config::{load_augment_definitions, load_toml};
use augment_core::{ArenaConstants, AugmentRegistry};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::MatchSimulation;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arena_sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rounds to play
    #[arg(short, long, default_value_t = 5)]
    rounds: u32,

    /// Ships in the arena
    #[arg(short, long, default_value_t = 4)]
    ships: u64,

    /// Ticks per round (defaults to round_duration * tick_rate)
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Seed for the match script (overrides the arena file)
    #[arg(long)]
    seed: Option<u64>,

    /// Augment definitions TOML (defaults to the bundled set)
    #[arg(long)]
    augments: Option<PathBuf>,

    /// Arena constants TOML (defaults to the bundled constants)
    #[arg(long)]
    arena: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let registry: AugmentRegistry = match &cli.augments {
        Some(path) => load_augment_definitions(path)
            .with_context(|| format!("Failed to load augments from {}", path.display()))?
            .into_iter()
            .collect(),
        None => AugmentRegistry::with_defaults(),
    };

    let mut constants: ArenaConstants = match &cli.arena {
        Some(path) => load_toml(path).with_context(|| format!("Failed to load arena from {}", path.display()))?,
        None => ArenaConstants::bundled(),
    };
    if let Some(seed) = cli.seed {
        constants.seed = seed;
    }

    let ticks = cli.ticks.unwrap_or_else(|| constants.ticks_per_round());
    tracing::info!(
        rounds = cli.rounds,
        ships = cli.ships,
        ticks,
        augments = registry.len(),
        seed = constants.seed,
        "starting match"
    );

    let rng = ChaCha8Rng::seed_from_u64(constants.seed);
    let summary = MatchSimulation::new(&registry, &constants, cli.ships, rng).run(cli.rounds, ticks);

    println!(
        "{} rounds, {} ticks, {} combat events",
        summary.rounds, summary.ticks, summary.events
    );
    println!(
        "{:<6} {:>6} {:>6} {:>10} {:>6} {:>6}  augments",
        "ship", "shots", "hits", "damage", "kills", "deaths"
    );
    for (id, ship) in &summary.ships {
        println!(
            "{:<6} {:>6} {:>6} {:>10.1} {:>6} {:>6}  {}",
            id.to_string(),
            ship.shots,
            ship.hits,
            ship.damage_dealt,
            ship.kills,
            ship.deaths,
            ship.augments.join(", ")
        );
    }

    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}
