//! Headless simulation driver.
//!
//! Runs the ecosystem on the fixed-timestep clock, logging a population
//! report periodically and a summary at the end.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use critters::simulation::ecosystem::Ecosystem;
use critters::simulation::noise::{Noise, RngNoise};
use critters::simulation::params::Params;
use critters::simulation::stats::PopulationStats;

#[derive(Debug, Parser)]
#[command(name = "critters", about = "Agent-based life simulation")]
struct Args {
    /// Number of fixed ticks to run.
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// JSON parameter file; missing fields use defaults.
    #[arg(long)]
    params: Option<PathBuf>,
    /// Simulation speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
    /// Seed for the random generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks between population reports; 0 disables them.
    #[arg(long, default_value_t = 600)]
    report_every: u64,
    /// Write the final summary as JSON to this path.
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    finished_at: DateTime<Utc>,
    ticks: u64,
    survivors: usize,
    oldest: Vec<(String, f32)>,
    stats: PopulationStats,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let params = match &args.params {
        Some(path) => Params::from_json_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => Params::default(),
    };

    let summary = match args.seed {
        Some(seed) => {
            let mut noise = RngNoise::from_rng(StdRng::seed_from_u64(seed));
            run(&args, &params, &mut noise)
        }
        None => run(&args, &params, &mut RngNoise::new()),
    };

    info!(
        ticks = summary.ticks,
        survivors = summary.survivors,
        births = summary.stats.births,
        deaths = summary.stats.deaths,
        total = summary.stats.total_ever_lived,
        seconds = summary.stats.simulated_time,
        "simulation finished"
    );

    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }

    Ok(())
}

fn run(args: &Args, params: &Params, noise: &mut impl Noise) -> RunSummary {
    let mut ecosystem = Ecosystem::new(params, noise);
    ecosystem.set_speed(args.speed, params);
    if (ecosystem.speed() - args.speed).abs() > f32::EPSILON {
        let used = ecosystem.speed();
        warn!(requested = args.speed, used, "speed clamped");
    }

    let mut ticks = 0;
    while ticks < args.ticks {
        let ran = ecosystem.advance_frame(params, params.physics_timestep, noise);
        ticks += u64::from(ran);

        if ran > 0 && args.report_every > 0 && ticks % args.report_every == 0 {
            let leader = ecosystem.oldest(1);
            info!(
                tick = ticks,
                time = ecosystem.time,
                population = ecosystem.creatures.len(),
                food = ecosystem.food.len(),
                oldest = leader.first().map(|c| c.name.as_str()).unwrap_or("-"),
                "report"
            );
        }

        if ecosystem.is_extinct() {
            info!(
                tick = ticks,
                time = ecosystem.time,
                "game over: no creatures left"
            );
            break;
        }
    }

    RunSummary {
        finished_at: Utc::now(),
        ticks,
        survivors: ecosystem.creatures.len(),
        oldest: ecosystem
            .oldest(10)
            .into_iter()
            .map(|c| (c.name.clone(), c.age))
            .collect(),
        stats: ecosystem.stats.clone(),
    }
}
