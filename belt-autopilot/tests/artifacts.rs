use anyhow::Result;
use belt_autopilot::benchmark::{run_benchmark, BenchmarkConfig, BenchmarkReport};
use belt_autopilot::runner::run_pilot;
use belt_core::SimConfig;

#[test]
fn benchmark_writes_a_parseable_summary() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let report = run_benchmark(BenchmarkConfig {
        sim: SimConfig {
            density_per_mille: 0,
            ..SimConfig::default()
        },
        seeds: vec![1, 2, 3],
        max_ticks: 200,
        out_dir: tmp.path().to_path_buf(),
        jobs: Some(2),
    })?;

    assert_eq!(report.seed_count, 3);
    assert_eq!(report.survival_rate, 1.0);
    assert_eq!(report.avg_ticks, 200.0);

    let bytes = std::fs::read(tmp.path().join("summary.json"))?;
    let parsed: BenchmarkReport = serde_json::from_slice(&bytes)?;
    assert_eq!(parsed.runs.len(), 3);
    assert!(parsed.runs.iter().all(|run| !run.collided));
    Ok(())
}

#[test]
fn benchmark_rejects_an_empty_seed_list() {
    let tmp = tempfile::tempdir().unwrap();
    let result = run_benchmark(BenchmarkConfig {
        sim: SimConfig::default(),
        seeds: Vec::new(),
        max_ticks: 100,
        out_dir: tmp.path().to_path_buf(),
        jobs: None,
    });
    assert!(result.is_err());
}

#[test]
fn identical_configs_replay_identical_runs() -> Result<()> {
    let cfg = SimConfig {
        width: 24,
        height: 10,
        density_per_mille: 200,
        min_gap_rows: 4,
        seed: 0x1234_5678,
        ..SimConfig::default()
    };
    let a = run_pilot(&cfg, 400)?;
    let b = run_pilot(&cfg, 400)?;
    assert_eq!(a.tape, b.tape);
    assert_eq!(a.metrics.ticks_survived, b.metrics.ticks_survived);
    assert_eq!(a.metrics.replans, b.metrics.replans);
    Ok(())
}
