//! Battle resolution rules.
//!
//! Pure functions and value types for deciding a head-to-head battle. The
//! stateful engine that talks to a store lives in the runtime crate.
//!
//! # Core Functions
//!
//! - `score`: Comparison score of a single meal
//! - `normalized_delta`: Score gap scaled into `[0, 1)`
//! - `decide`: Winner for two scores and one random draw
//! - `Lineup`: Fixed-capacity, ordered pool of two combatants

pub mod lineup;
pub mod score;
pub mod threshold;

pub use lineup::{Lineup, LineupFull};
pub use score::score;
pub use threshold::{Side, decide, normalized_delta};
