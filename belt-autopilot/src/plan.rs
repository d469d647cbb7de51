use belt_core::Move;
use serde::{Deserialize, Serialize};

/// The caller-owned route across the remaining field width: one move per
/// column the far edge still has to travel before reaching the ship. The
/// host hands the plan back each tick and receives it updated; slots past
/// the meaningful horizon stay `Hold`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    moves: Vec<Move>,
}

impl Plan {
    /// A neutral plan of `horizon` holds.
    pub fn hold(horizon: usize) -> Self {
        Self {
            moves: vec![Move::Hold; horizon],
        }
    }

    pub fn from_moves(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn horizon(&self) -> usize {
        self.moves.len()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Consumes the front move: the remainder shifts one slot forward and
    /// the vacated final slot becomes `Hold`, mirroring the one-column
    /// scroll of the field itself.
    pub fn advance(&mut self) -> Move {
        if self.moves.is_empty() {
            return Move::Hold;
        }
        let step = self.moves.remove(0);
        self.moves.push(Move::Hold);
        step
    }

    /// Row the ship ends on after playing every pending move from
    /// `start_row`.
    pub fn projected_row(&self, start_row: i32) -> i32 {
        self.moves
            .iter()
            .fold(start_row, |row, step| row + step.row_delta())
    }

    pub(crate) fn set(&mut self, index: usize, step: Move) {
        self.moves[index] = step;
    }

    pub(crate) fn set_last(&mut self, step: Move) {
        if let Some(slot) = self.moves.last_mut() {
            *slot = step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_shifts_and_backfills_hold() {
        let mut plan = Plan::from_moves(vec![Move::Up, Move::Hold, Move::Down, Move::Hold]);
        assert_eq!(plan.advance(), Move::Up);
        assert_eq!(
            plan.moves(),
            &[Move::Hold, Move::Down, Move::Hold, Move::Hold]
        );
    }

    #[test]
    fn advance_on_an_empty_plan_holds() {
        let mut plan = Plan::hold(0);
        assert_eq!(plan.advance(), Move::Hold);
        assert_eq!(plan.horizon(), 0);
    }

    #[test]
    fn projected_row_sums_the_deltas() {
        let plan = Plan::from_moves(vec![Move::Up, Move::Up, Move::Down, Move::Hold]);
        assert_eq!(plan.projected_row(3), 2);
        assert_eq!(Plan::hold(5).projected_row(3), 3);
    }
}
