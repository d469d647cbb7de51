//! Autopilot CLI: fly a seeded crossing headlessly, sweep many seeds, or
//! inspect the goal list the pilot sees.
//!
//! Usage:
//!   cargo run -p belt-autopilot -- run --seed 3735928559 --max-ticks 2000
//!   cargo run -p belt-autopilot -- bench --seed-count 32 --out-dir bench-out
//!   RUST_LOG=debug cargo run -p belt-autopilot -- run --config sim.json

use anyhow::{Context, Result};
use belt_autopilot::benchmark::{run_benchmark, BenchmarkConfig};
use belt_autopilot::pilot::{end_goals, Pilot};
use belt_autopilot::plan::Plan;
use belt_autopilot::runner::run_pilot;
use belt_core::constants::DEFAULT_SEED;
use belt_core::{FieldSim, SeededRng, SimConfig, TickOutcome};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "belt-autopilot")]
#[command(about = "Drive the obstacle-field autopilot against the headless simulator")]
struct Args {
    /// Optional JSON file with simulator settings (width, height, ship
    /// width, density, gap, seed). Command flags override its seed.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fly a single seeded crossing and print the outcome.
    Run {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u32,
        #[arg(long, default_value_t = 2000)]
        max_ticks: u32,
        /// Write the played move tape as JSON.
        #[arg(long)]
        tape_out: Option<PathBuf>,
    },
    /// Sweep the pilot across many seeds and write summary.json.
    Bench {
        /// Explicit seeds; repeatable. Generated from the base seed when
        /// none are given.
        #[arg(long = "seed")]
        seeds: Vec<u32>,
        #[arg(long, default_value_t = 16)]
        seed_count: u32,
        #[arg(long, default_value_t = 2000)]
        max_ticks: u32,
        #[arg(long, default_value = "bench-out")]
        out_dir: PathBuf,
        /// Bound the rayon worker count.
        #[arg(long)]
        jobs: Option<usize>,
    },
    /// Print the center-out goal list after a number of warmup ticks.
    Goals {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u32,
        #[arg(long, default_value_t = 0)]
        warmup_ticks: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let base_cfg = load_config(args.config.as_deref())?;

    match args.command {
        Command::Run {
            seed,
            max_ticks,
            tape_out,
        } => {
            let cfg = SimConfig { seed, ..base_cfg };
            let artifact = run_pilot(&cfg, max_ticks)?;
            let m = &artifact.metrics;

            println!("=== RUN RESULT ===");
            println!("  Seed:      {:#010x}", m.seed);
            println!("  Ticks:     {} / {}", m.ticks_survived, m.max_ticks);
            println!(
                "  Outcome:   {}",
                if m.collided { "collided" } else { "survived" }
            );
            println!("  Replans:   {}", m.replans);
            println!(
                "  Moves:     up={} down={} hold={}",
                m.up_moves, m.down_moves, m.hold_moves
            );

            if let Some(path) = tape_out {
                fs::write(
                    &path,
                    serde_json::to_vec_pretty(&artifact.tape)
                        .context("failed to serialize tape")?,
                )
                .with_context(|| format!("failed writing {}", path.display()))?;
                println!("  Tape:      {}", path.display());
            }
        }
        Command::Bench {
            seeds,
            seed_count,
            max_ticks,
            out_dir,
            jobs,
        } => {
            let seeds = if seeds.is_empty() {
                generate_seeds(base_cfg.seed, seed_count)
            } else {
                seeds
            };
            let report = run_benchmark(BenchmarkConfig {
                sim: base_cfg,
                seeds,
                max_ticks,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("=== BENCHMARK ===");
            println!("  Seeds:         {}", report.seed_count);
            println!("  Avg ticks:     {:.1}", report.avg_ticks);
            println!("  Avg replans:   {:.1}", report.avg_replans);
            println!("  Survival rate: {:.1}%", report.survival_rate * 100.0);
            println!("  Report:        {}", out_dir.join("summary.json").display());
        }
        Command::Goals { seed, warmup_ticks } => {
            let cfg = SimConfig { seed, ..base_cfg };
            let mut sim = FieldSim::new(&cfg)?;
            let pilot = Pilot::new(cfg.ship_width);
            let mut state: Option<Plan> = None;
            for _ in 0..warmup_ticks {
                let action = pilot.next_move(sim.field(), state.take())?;
                if sim.step(action.step) == TickOutcome::Collided {
                    println!("collided during warmup at tick {}", sim.ticks());
                    break;
                }
                state = Some(action.plan);
            }
            println!(
                "goals after {} ticks: {:?}",
                warmup_ticks,
                end_goals(sim.field())
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let bytes = fs::read(path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("invalid simulator config in {}", path.display()))
        }
        None => Ok(SimConfig::default()),
    }
}

fn generate_seeds(base: u32, count: u32) -> Vec<u32> {
    let mut rng = SeededRng::new(base);
    (0..count).map(|_| rng.next_u32()).collect()
}
