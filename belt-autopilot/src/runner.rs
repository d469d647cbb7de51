use anyhow::{anyhow, Context, Result};
use belt_core::{FieldSim, Move, SimConfig, TickOutcome};
use serde::Serialize;

use crate::pilot::Pilot;
use crate::plan::Plan;

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub seed: u32,
    pub max_ticks: u32,
    pub ticks_survived: u32,
    pub collided: bool,
    pub up_moves: u32,
    pub down_moves: u32,
    pub hold_moves: u32,
    pub replans: u32,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    /// Every move played, in order.
    pub tape: Vec<Move>,
}

/// Drives the pilot against the headless simulator under the host contract:
/// the plan is carried between ticks by this loop, exactly as a real game
/// loop would carry it, and the field scrolls once per tick inside the sim.
pub fn run_pilot(cfg: &SimConfig, max_ticks: u32) -> Result<RunArtifact> {
    if max_ticks == 0 {
        return Err(anyhow!("max_ticks must be > 0"));
    }

    let mut sim = FieldSim::new(cfg).context("simulator rejected the configuration")?;
    let pilot = Pilot::new(cfg.ship_width);
    let mut state: Option<Plan> = None;
    let mut tape = Vec::with_capacity(max_ticks as usize);
    let mut replans = 0u32;

    while sim.ticks() < max_ticks {
        let action = pilot
            .next_move(sim.field(), state.take())
            .with_context(|| format!("pilot failed at tick {}", sim.ticks()))?;
        if action.replanned {
            replans += 1;
        }
        tape.push(action.step);
        let outcome = sim.step(action.step);
        state = Some(action.plan);
        if outcome == TickOutcome::Collided {
            break;
        }
    }

    let mut up_moves = 0u32;
    let mut down_moves = 0u32;
    let mut hold_moves = 0u32;
    for step in &tape {
        match step {
            Move::Up => up_moves += 1,
            Move::Down => down_moves += 1,
            Move::Hold => hold_moves += 1,
        }
    }

    Ok(RunArtifact {
        metrics: RunMetrics {
            seed: cfg.seed,
            max_ticks,
            ticks_survived: sim.ticks(),
            collided: sim.collided(),
            up_moves,
            down_moves,
            hold_moves,
            replans,
        },
        tape,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tick_budget_is_rejected() {
        assert!(run_pilot(&SimConfig::default(), 0).is_err());
    }

    #[test]
    fn empty_field_is_survived_on_a_single_plan() {
        let cfg = SimConfig {
            density_per_mille: 0,
            seed: 42,
            ..SimConfig::default()
        };
        let artifact = run_pilot(&cfg, 300).unwrap();
        assert_eq!(artifact.metrics.ticks_survived, 300);
        assert!(!artifact.metrics.collided);
        assert_eq!(artifact.metrics.replans, 1);
        assert_eq!(artifact.metrics.hold_moves, 300);
        assert_eq!(artifact.tape.len(), 300);
    }

    #[test]
    fn move_counts_add_up_to_the_tape_length() {
        let cfg = SimConfig {
            width: 20,
            height: 10,
            density_per_mille: 220,
            min_gap_rows: 4,
            seed: 0xC0FF_EE11,
            ..SimConfig::default()
        };
        let artifact = run_pilot(&cfg, 200).unwrap();
        let m = &artifact.metrics;
        assert_eq!(
            (m.up_moves + m.down_moves + m.hold_moves) as usize,
            artifact.tape.len()
        );
        assert!(m.ticks_survived >= 1);
        assert_eq!(m.collided, m.ticks_survived < m.max_ticks);
    }
}
