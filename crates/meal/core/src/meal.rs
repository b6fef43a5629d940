//! Meal records and the value types attached to them.

use core::fmt;

use crate::error::ValidationError;

/// Stable catalog key. Assigned by the store, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MealId(pub u32);

impl MealId {
    /// First id handed out by an empty catalog.
    pub const FIRST: MealId = MealId(1);

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> MealId {
        MealId(self.0 + 1)
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MealId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Preparation difficulty of a meal.
///
/// Harder meals receive a smaller score penalty in battle.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[strum(serialize_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    /// Parses the exact uppercase tag (`LOW`, `MED`, `HIGH`).
    pub fn from_tag(tag: &str) -> Result<Self, ValidationError> {
        tag.parse()
            .map_err(|_| ValidationError::UnknownDifficulty(tag.to_owned()))
    }

    /// Points subtracted from a meal's battle score.
    pub const fn penalty(&self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Med => 2.0,
            Self::Low => 3.0,
        }
    }
}

/// Result of one battle from a single meal's point of view.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Parses the exact lowercase tag (`win`, `loss`).
    pub fn from_tag(tag: &str) -> Result<Self, ValidationError> {
        tag.parse()
            .map_err(|_| ValidationError::UnknownOutcome(tag.to_owned()))
    }
}

/// A catalog entry together with its accumulated battle statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meal {
    pub id: MealId,
    #[cfg_attr(feature = "serde", serde(rename = "meal"))]
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    #[cfg_attr(feature = "serde", serde(default))]
    pub battles: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wins: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deleted: bool,
}

impl Meal {
    /// Builds a fresh record from validated input.
    pub fn from_new(id: MealId, meal: NewMeal) -> Self {
        Self {
            id,
            name: meal.name,
            cuisine: meal.cuisine,
            price: meal.price,
            difficulty: meal.difficulty,
            battles: 0,
            wins: 0,
            deleted: false,
        }
    }

    /// Applies one battle result. `wins <= battles` holds afterwards.
    ///
    /// Leaves the record untouched if either counter would overflow.
    pub fn record(&mut self, outcome: Outcome) -> Result<(), StatsOverflow> {
        let overflow = StatsOverflow { id: self.id };
        let battles = self.battles.checked_add(1).ok_or(overflow)?;
        let wins = match outcome {
            Outcome::Win => self.wins.checked_add(1).ok_or(overflow)?,
            Outcome::Loss => self.wins,
        };

        self.battles = battles;
        self.wins = wins;
        Ok(())
    }

    /// `wins / battles`, or `None` before the first battle.
    pub fn win_pct(&self) -> Option<f64> {
        (self.battles > 0).then(|| f64::from(self.wins) / f64::from(self.battles))
    }
}

/// Raised when a battle counter of a meal is already at its maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Battle statistics for meal {id} cannot be incremented further")]
pub struct StatsOverflow {
    pub id: MealId,
}

/// Attributes supplied when creating a meal.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
}

impl NewMeal {
    /// Validates the attributes and returns them ready for insertion.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] / [`ValidationError::EmptyCuisine`] for blank text
    /// - [`ValidationError::InvalidPrice`] unless the price is finite and positive
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price: f64,
        difficulty: Difficulty,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let cuisine = cuisine.into();

        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if cuisine.trim().is_empty() {
            return Err(ValidationError::EmptyCuisine);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::InvalidPrice(price));
        }

        Ok(Self {
            name,
            cuisine,
            price,
            difficulty,
        })
    }
}
