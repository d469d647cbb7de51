pub mod benchmark;
pub mod pilot;
pub mod plan;
pub mod runner;

pub use pilot::{Pilot, PilotError, ShipAction};
pub use plan::Plan;
