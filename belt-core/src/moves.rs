use serde::{Deserialize, Serialize};

/// One vertical step of the ship for a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Hold,
}

impl Move {
    /// Row delta applied when the move executes. Rows grow downward.
    pub fn row_delta(self) -> i32 {
        match self {
            Move::Up => -1,
            Move::Down => 1,
            Move::Hold => 0,
        }
    }
}
