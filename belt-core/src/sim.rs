use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_MIN_GAP_ROWS, DEFAULT_SEED,
    DEFAULT_SHIP_WIDTH, DEFAULT_SPAWN_DENSITY_PER_MILLE,
};
use crate::error::FieldError;
use crate::field::{Cell, Field};
use crate::moves::Move;
use crate::rng::SeededRng;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub ship_width: i32,
    // Per-mille chance that a spawned far-edge cell holds an asteroid.
    pub density_per_mille: u32,
    pub min_gap_rows: i32,
    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            ship_width: DEFAULT_SHIP_WIDTH,
            density_per_mille: DEFAULT_SPAWN_DENSITY_PER_MILLE,
            min_gap_rows: DEFAULT_MIN_GAP_ROWS,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TickOutcome {
    Flying,
    Collided,
}

#[derive(Clone, Debug)]
pub struct FieldSim {
    field: Field,
    rng: SeededRng,
    ship_row: i32,
    ship_width: i32,
    density_per_mille: u32,
    min_gap_rows: i32,
    ticks: u32,
    collided: bool,
}

impl FieldSim {
    pub fn new(cfg: &SimConfig) -> Result<Self, FieldError> {
        if cfg.ship_width < 1 || cfg.width <= cfg.ship_width || cfg.height < 1 {
            return Err(FieldError::FieldTooNarrow {
                width: cfg.width,
                height: cfg.height,
                ship_width: cfg.ship_width,
            });
        }
        if cfg.density_per_mille > 1000 {
            return Err(FieldError::DensityOutOfRange(cfg.density_per_mille));
        }
        if cfg.min_gap_rows < 1 || cfg.min_gap_rows > cfg.height {
            return Err(FieldError::GapTooTall {
                min_gap: cfg.min_gap_rows,
                height: cfg.height,
            });
        }

        let ship_row = cfg.height / 2;
        let mut field = Field::empty(cfg.width, cfg.height);
        field.set(0, ship_row, Cell::ShipHead);

        Ok(Self {
            field,
            rng: SeededRng::new(cfg.seed),
            ship_row,
            ship_width: cfg.ship_width,
            density_per_mille: cfg.density_per_mille,
            min_gap_rows: cfg.min_gap_rows,
            ticks: 0,
            collided: false,
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn ship_row(&self) -> i32 {
        self.ship_row
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn collided(&self) -> bool {
        self.collided
    }

    // One tick of the host contract: apply the ship's move, scroll exactly
    // one column left, spawn the next far-edge column, resolve collisions.
    pub fn step(&mut self, step: Move) -> TickOutcome {
        if self.collided {
            return TickOutcome::Collided;
        }

        let next_row = self.ship_row + step.row_delta();
        if next_row < 0 || next_row >= self.field.height() {
            // Steering off the top or bottom edge wrecks the ship too.
            self.collided = true;
            return TickOutcome::Collided;
        }
        self.ship_row = next_row;

        let incoming = self.spawn_column();
        self.field.scroll_left(&incoming);

        let overlap = (0..self.ship_width)
            .any(|col| self.field.at(col, self.ship_row) == Some(Cell::Asteroid));
        if overlap {
            self.collided = true;
            return TickOutcome::Collided;
        }

        self.field.set(0, self.ship_row, Cell::ShipHead);
        self.ticks += 1;
        TickOutcome::Flying
    }

    fn spawn_column(&mut self) -> Vec<Cell> {
        let height = self.field.height();
        let mut column = vec![Cell::Empty; height as usize];
        for cell in &mut column {
            if self.rng.below(1000) < self.density_per_mille {
                *cell = Cell::Asteroid;
            }
        }

        // A corridor of min_gap_rows always survives the spawn.
        let slots = (height - self.min_gap_rows + 1) as u32;
        let gap_start = self.rng.below(slots) as i32;
        for row in gap_start..gap_start + self.min_gap_rows {
            column[row as usize] = Cell::Empty;
        }

        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u32, density: u32) -> SimConfig {
        SimConfig {
            width: 12,
            height: 8,
            ship_width: 3,
            density_per_mille: density,
            min_gap_rows: 3,
            seed,
        }
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let narrow = SimConfig {
            width: 3,
            ship_width: 3,
            ..SimConfig::default()
        };
        assert!(matches!(
            FieldSim::new(&narrow),
            Err(FieldError::FieldTooNarrow { .. })
        ));

        let dense = SimConfig {
            density_per_mille: 1500,
            ..SimConfig::default()
        };
        assert!(matches!(
            FieldSim::new(&dense),
            Err(FieldError::DensityOutOfRange(1500))
        ));

        let tall_gap = SimConfig {
            min_gap_rows: 40,
            height: 24,
            ..SimConfig::default()
        };
        assert!(matches!(
            FieldSim::new(&tall_gap),
            Err(FieldError::GapTooTall { .. })
        ));
    }

    #[test]
    fn same_seed_and_moves_replay_identically() {
        let cfg = config(0xC0FF_EE11, 250);
        let mut a = FieldSim::new(&cfg).unwrap();
        let mut b = FieldSim::new(&cfg).unwrap();
        let moves = [Move::Hold, Move::Up, Move::Down, Move::Hold, Move::Down];
        for step in moves {
            assert_eq!(a.step(step), b.step(step));
            assert_eq!(a.field(), b.field());
            assert_eq!(a.ship_row(), b.ship_row());
        }
    }

    #[test]
    fn spawned_columns_keep_a_corridor_open() {
        let cfg = config(0x1234_5678, 1000);
        let mut sim = FieldSim::new(&cfg).unwrap();
        for _ in 0..50 {
            if sim.step(Move::Hold) == TickOutcome::Collided {
                break;
            }
            let far = sim.field().width() - 1;
            let open_run = (0..sim.field().height())
                .scan(0, |run, row| {
                    if sim.field().at(far, row) == Some(Cell::Empty) {
                        *run += 1;
                    } else {
                        *run = 0;
                    }
                    Some(*run)
                })
                .max()
                .unwrap_or(0);
            assert!(open_run >= cfg.min_gap_rows, "tick {}", sim.ticks());
        }
    }

    #[test]
    fn edge_exit_collides() {
        let cfg = config(1, 0);
        let mut sim = FieldSim::new(&cfg).unwrap();
        // height 8 puts the ship on row 4; four Ups leave the field.
        for _ in 0..4 {
            assert_eq!(sim.step(Move::Up), TickOutcome::Flying);
        }
        assert_eq!(sim.step(Move::Up), TickOutcome::Collided);
        assert!(sim.collided());
        // A collided sim stays collided.
        assert_eq!(sim.step(Move::Hold), TickOutcome::Collided);
    }

    #[test]
    fn marker_follows_the_ship() {
        let cfg = config(9, 0);
        let mut sim = FieldSim::new(&cfg).unwrap();
        assert_eq!(sim.field().ship_row(), Some(4));
        sim.step(Move::Up);
        assert_eq!(sim.field().ship_row(), Some(3));
        sim.step(Move::Down);
        assert_eq!(sim.field().ship_row(), Some(4));
    }
}
