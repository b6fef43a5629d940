//! Meal catalog rules and battle math shared across the workspace.
//!
//! `meal-core` defines the canonical data (meals, difficulty, outcomes), the
//! validation applied before anything reaches a store, the battle score and
//! winner rule, and the ranking used by every leaderboard. Everything here
//! is pure; persistence and the stateful engine live in `meal-runtime`.
pub mod battle;
pub mod error;
pub mod leaderboard;
pub mod meal;
pub mod rng;

pub use battle::{Lineup, LineupFull, Side, decide, normalized_delta, score};
pub use error::{ErrorSeverity, ValidationError};
pub use leaderboard::{LeaderboardEntry, LeaderboardSort, rank};
pub use meal::{Difficulty, Meal, MealId, NewMeal, Outcome, StatsOverflow};
pub use rng::{FixedRandom, PcgRandom, RandomSource, SequenceRandom};
