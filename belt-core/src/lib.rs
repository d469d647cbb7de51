pub mod constants;
pub mod error;
pub mod field;
pub mod moves;
pub mod rng;
pub mod sim;

pub use error::FieldError;
pub use field::{Cell, Field};
pub use moves::Move;
pub use rng::SeededRng;
pub use sim::{FieldSim, SimConfig, TickOutcome};
