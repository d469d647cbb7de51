use belt_core::{Cell, Field, Move};
use thiserror::Error;

use crate::plan::Plan;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PilotError {
    #[error("ship marker missing from the entry column")]
    ShipNotFound,
    #[error("no open goal row admits a full-width route")]
    NoViablePlan,
}

#[derive(Clone, Debug)]
pub struct ShipAction {
    pub step: Move,
    pub plan: Plan,
    pub replanned: bool,
}

// head_col is the ship's leading cell. Rows outside the field are walls;
// columns past the far edge are open space.
pub fn move_is_safe(field: &Field, ship_width: i32, head_col: i32, row: i32, step: Move) -> bool {
    let lead_col = head_col + 1;
    match step {
        Move::Hold => field.at(lead_col, row) != Some(Cell::Asteroid),
        Move::Up | Move::Down => {
            let target_row = row + step.row_delta();
            if target_row < 0 || target_row >= field.height() {
                return false;
            }
            (0..ship_width)
                .all(|part| field.at(lead_col - part, target_row) != Some(Cell::Asteroid))
        }
    }
}

pub fn next_safe_move(
    field: &Field,
    ship_width: i32,
    head_col: i32,
    row: i32,
    goal: i32,
) -> Option<Move> {
    if !field.check_point(head_col, row) {
        return None;
    }

    // Close the gap toward the goal when safely possible, hold otherwise,
    // regress only as a last resort.
    let ladder = if row == goal {
        [Move::Hold, Move::Down, Move::Up]
    } else if row > goal {
        [Move::Up, Move::Hold, Move::Down]
    } else {
        [Move::Down, Move::Hold, Move::Up]
    };

    ladder
        .into_iter()
        .find(|&step| move_is_safe(field, ship_width, head_col, row, step))
}

// Open rows at the far edge, center-out: central destinations leave the
// ship the most room to maneuver later.
pub fn end_goals(field: &Field) -> Vec<i32> {
    let center = field.height() / 2;
    let far_col = field.width() - 1;
    let mut goals = Vec::new();

    for k in 0..field.height() {
        let upper = center - k;
        if upper >= 0 && field.at(far_col, upper) != Some(Cell::Asteroid) {
            goals.push(upper);
        }
        let lower = center + k;
        if k > 0 && lower < field.height() && field.at(far_col, lower) != Some(Cell::Asteroid) {
            goals.push(lower);
        }
    }

    goals
}

pub fn compute_plan(
    field: &Field,
    ship_width: i32,
    ship_row: i32,
    goals: &[i32],
) -> Result<Plan, PilotError> {
    let horizon = (field.width() - ship_width).max(0) as usize;

    'goals: for &goal in goals {
        let mut plan = Plan::hold(horizon);
        let mut row = ship_row;
        for col in 0..horizon {
            let head_col = col as i32 + ship_width - 1;
            let Some(step) = next_safe_move(field, ship_width, head_col, row, goal) else {
                continue 'goals;
            };
            row += step.row_delta();
            plan.set(col, step);
        }
        return Ok(plan);
    }

    Err(PilotError::NoViablePlan)
}

// The one-slot frontier extension is only sound because the host scrolls
// exactly one column per tick. Returns whether a full rebuild happened.
pub fn continue_plan(
    plan: &mut Plan,
    field: &Field,
    ship_width: i32,
    ship_row: i32,
    goals: &[i32],
) -> Result<bool, PilotError> {
    let frontier_row = plan.projected_row(ship_row);
    let frontier = goals
        .first()
        .and_then(|&goal| next_safe_move(field, ship_width, field.width() - 2, frontier_row, goal));

    match frontier {
        Some(step) => {
            plan.set_last(step);
            Ok(false)
        }
        None => {
            tracing::debug!(frontier_row, "frontier step unsafe, rebuilding plan");
            *plan = compute_plan(field, ship_width, ship_row, goals)?;
            Ok(true)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Pilot {
    ship_width: i32,
}

impl Pilot {
    pub fn new(ship_width: i32) -> Self {
        Self { ship_width }
    }

    // A missing ship marker is a hard error; exhausting every goal is not:
    // the pilot falls back to the safest immediate move, hands back a
    // neutral plan, and lets the next tick retry planning.
    pub fn next_move(&self, field: &Field, state: Option<Plan>) -> Result<ShipAction, PilotError> {
        let ship_row = field.ship_row().ok_or(PilotError::ShipNotFound)?;
        let goals = end_goals(field);
        let horizon = (field.width() - self.ship_width).max(0) as usize;

        let planned = match state {
            Some(mut plan) if plan.horizon() == horizon => {
                continue_plan(&mut plan, field, self.ship_width, ship_row, &goals)
                    .map(|replanned| (plan, replanned))
            }
            _ => compute_plan(field, self.ship_width, ship_row, &goals).map(|plan| (plan, true)),
        };

        let (mut plan, replanned) = match planned {
            Ok(done) => done,
            Err(PilotError::NoViablePlan) => {
                tracing::warn!(ship_row, "no viable route to the far edge, holding position");
                let step =
                    next_safe_move(field, self.ship_width, self.ship_width - 1, ship_row, ship_row)
                        .unwrap_or(Move::Hold);
                let mut plan = Plan::hold(horizon);
                if horizon > 0 {
                    plan.set(0, step);
                }
                (plan, true)
            }
            Err(other) => return Err(other),
        };

        let step = plan.advance();
        Ok(ShipAction {
            step,
            plan,
            replanned,
        })
    }
}
