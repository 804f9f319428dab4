//! Orbis - command line runner
//!
//! Generates a world, runs the simulation for a number of ticks and prints a
//! summary. The full output can be written as JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use orbis::core::config::SimulationConfig;
use orbis::core::error::Result;
use orbis::simulation::{Scene, SimulationOutput};

/// Orbis - civilizations competing for a procedural world
#[derive(Parser, Debug)]
#[command(name = "orbis")]
#[command(about = "Run a territorial civilization simulation")]
struct Args {
    /// TOML config file; defaults are used for anything it omits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Map width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Map height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Number of civilizations to place
    #[arg(long)]
    civs: Option<usize>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Write the full JSON output here
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbis=info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if let Some(civs) = args.civs {
        config.placement.civ_count = civs;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    config.validate()?;

    println!("Orbis");
    println!("=====");
    println!(
        "Map: {}x{} {:?}, seed {}",
        config.world.width, config.world.height, config.world.topology, config.world.seed
    );
    println!("Civilizations: {}", config.placement.civ_count);
    println!("Simulating {} ticks...", config.ticks);
    println!();

    let start = Instant::now();
    let mut scene = Scene::generate(config.clone())?;
    scene.run(config.ticks);
    let elapsed = start.elapsed();

    let output = SimulationOutput::new(&scene, elapsed);
    println!("{}", output.summary());

    println!("\n--- Civilizations ---");
    for civ in &output.civilizations {
        let status = if !civ.alive {
            "collapsed"
        } else if civ.at_war {
            "at war"
        } else {
            "at peace"
        };
        println!(
            "{:<24} {} pop {:>6} cells {:>4} wealth {:>8.1} ({})",
            civ.name, civ.color, civ.population, civ.territory, civ.total_wealth, status
        );
    }

    if let Some(path) = &args.output {
        std::fs::write(path, output.to_json()?)?;
        println!("\nFull output written to {}", path.display());
    }

    Ok(())
}
