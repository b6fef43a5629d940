//! Unified error type surfaced by meal stores and the battle engine.
//!
//! Wraps validation failures from `meal-core`, catalog conflicts, and
//! repository infrastructure failures so callers can map them to user-facing
//! responses in one place.
use std::fmt;

use meal_core::{ErrorSeverity, LineupFull, MealId, StatsOverflow, ValidationError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, KitchenError>;

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Meal with name '{name}' already exists")]
    Duplicate { name: String },

    #[error("Meal with {0} not found")]
    NotFound(MealKey),

    #[error("Meal with ID {id} has been deleted")]
    AlreadyDeleted { id: MealId },

    #[error("Combatant list is full, cannot add more combatants.")]
    Capacity,

    #[error("Two combatants must be prepped for a battle.")]
    InsufficientCombatants,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl KitchenError {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(err) => err.severity(),
            Self::Duplicate { .. }
            | Self::NotFound(_)
            | Self::AlreadyDeleted { .. }
            | Self::Capacity
            | Self::InsufficientCombatants => ErrorSeverity::Conflict,
            Self::Repository(_) => ErrorSeverity::Internal,
        }
    }
}

impl From<StatsOverflow> for KitchenError {
    fn from(err: StatsOverflow) -> Self {
        Self::Repository(RepositoryError::CorruptedData(err.to_string()))
    }
}

impl From<LineupFull> for KitchenError {
    fn from(_: LineupFull) -> Self {
        Self::Capacity
    }
}

/// Lookup key that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealKey {
    Id(MealId),
    Name(String),
}

impl fmt::Display for MealKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealKey::Id(id) => write!(f, "ID {}", id),
            MealKey::Name(name) => write!(f, "name '{}'", name),
        }
    }
}
