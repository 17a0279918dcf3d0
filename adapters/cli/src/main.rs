#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner for Galactic Defender.
//!
//! Plays a seeded run with a scripted pilot, feeding the simulation one frame
//! of wall time at a time, and prints a summary when the run ends.

mod autopilot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use galactic_defender_core::{Command, Event, PlayerClass};
use galactic_defender_simulation::{Phase, Simulation, TICK};
use galactic_defender_world::{query, SimulationConfig};
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;

#[derive(Parser, Debug)]
#[command(name = "galactic-defender")]
#[command(about = "Plays a deterministic Galactic Defender run without a window")]
struct Cli {
    /// Seed for spawn placement and upgrade draws
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Ship class to fly
    #[arg(long, value_enum, default_value_t = ClassArg::Hunter)]
    class: ClassArg,
    /// Upper bound on simulated ticks (60 per second)
    #[arg(long, default_value_t = 18_000)]
    ticks: u32,
    /// TOML file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ClassArg {
    Tank,
    Hunter,
    Assassin,
    Engineer,
    Berserker,
    Sniper,
}

impl From<ClassArg> for PlayerClass {
    fn from(class: ClassArg) -> Self {
        match class {
            ClassArg::Tank => Self::Tank,
            ClassArg::Hunter => Self::Hunter,
            ClassArg::Assassin => Self::Assassin,
            ClassArg::Engineer => Self::Engineer,
            ClassArg::Berserker => Self::Berserker,
            ClassArg::Sniper => Self::Sniper,
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    kills: u32,
    waves_cleared: u32,
    upgrades: u32,
    turrets: u32,
    powerups: u32,
    abilities: u32,
}

impl Tally {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemyKilled { .. } => self.kills += 1,
                Event::WaveCompleted { .. } => self.waves_cleared += 1,
                Event::UpgradeApplied { .. } => self.upgrades += 1,
                Event::TurretDeployed { .. } => self.turrets += 1,
                Event::PowerupCollected { .. } => self.powerups += 1,
                Event::AbilityActivated { .. } => self.abilities += 1,
                _ => {}
            }
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let class = PlayerClass::from(cli.class);

    let mut simulation = Simulation::new(config, cli.seed);
    let mut events = Vec::new();
    simulation
        .apply(Command::SelectClass { class }, &mut events)
        .context("starting the run")?;

    let mut pilot = Autopilot::default();
    let mut tally = Tally::default();
    while query::tick_index(simulation.world()) < u64::from(cli.ticks) {
        if simulation.phase() == Phase::GameOver {
            break;
        }
        if query::levels(simulation.world()).menu_open {
            simulation
                .apply(Command::SelectUpgrade { index: 0 }, &mut events)
                .context("choosing an upgrade")?;
        }

        let input = pilot.input(simulation.world());
        let _ran = simulation.advance(TICK, &input, &mut events);
        tally.record(&events);
        events.clear();
    }

    let world = simulation.world();
    let hud = query::hud(world);
    tracing::info!(
        seed = cli.seed,
        ticks = query::tick_index(world),
        score = hud.score,
        "run finished"
    );

    println!("class: {class:?}");
    println!("seed: {}", cli.seed);
    println!("ticks: {}", query::tick_index(world));
    println!("outcome: {}", outcome(simulation.phase()));
    println!("score: {}", hud.score);
    println!("wave: {}", hud.wave);
    println!("level: {}", hud.level);
    println!("kills: {}", tally.kills);
    println!("waves cleared: {}", tally.waves_cleared);
    println!("upgrades: {}", tally.upgrades);
    println!("turrets deployed: {}", tally.turrets);
    println!("powerups collected: {}", tally.powerups);
    println!("abilities used: {}", tally.abilities);
    Ok(())
}

fn outcome(phase: Phase) -> &'static str {
    match phase {
        Phase::GameOver => "destroyed",
        Phase::Running | Phase::AwaitingClass => "survived",
    }
}
