use anyhow::{anyhow, Context, Result};
use belt_core::SimConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::runner::{run_pilot, RunMetrics};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub seed: u32,
    pub seed_hex: String,
    pub ticks_survived: u32,
    pub collided: bool,
    pub replans: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub seed_count: usize,
    pub max_ticks: u32,
    pub avg_ticks: f64,
    pub avg_replans: f64,
    pub survival_rate: f64,
    pub runs: Vec<RunRecord>,
}

pub struct BenchmarkConfig {
    pub sim: SimConfig,
    pub seeds: Vec<u32>,
    pub max_ticks: u32,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

/// Sweeps the pilot across a seed list in parallel and writes the aggregate
/// report as `summary.json` in the output directory.
pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_one = |seed: &u32| -> Result<RunMetrics> {
        let cfg = SimConfig {
            seed: *seed,
            ..config.sim.clone()
        };
        let artifact = run_pilot(&cfg, config.max_ticks)
            .with_context(|| format!("benchmark run failed for seed={seed:#x}"))?;
        Ok(artifact.metrics)
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.seeds.par_iter().map(run_one).collect())
    } else {
        config.seeds.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let total_runs = runs.len();
    let sum_ticks: u64 = runs.iter().map(|m| m.ticks_survived as u64).sum();
    let sum_replans: u64 = runs.iter().map(|m| m.replans as u64).sum();
    let survived = runs.iter().filter(|m| !m.collided).count();

    let mut run_records: Vec<RunRecord> = runs
        .iter()
        .map(|m| RunRecord {
            seed: m.seed,
            seed_hex: format!("{:#010x}", m.seed),
            ticks_survived: m.ticks_survived,
            collided: m.collided,
            replans: m.replans,
        })
        .collect();
    run_records.sort_by(|a, b| b.ticks_survived.cmp(&a.ticks_survived));

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        seed_count: total_runs,
        max_ticks: config.max_ticks,
        avg_ticks: sum_ticks as f64 / total_runs as f64,
        avg_replans: sum_replans as f64 / total_runs as f64,
        survival_rate: survived as f64 / total_runs as f64,
        runs: run_records,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary")?,
    )?;

    Ok(report)
}
