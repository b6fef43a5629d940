//! Validation errors and severity classification for meal-core.
//!
//! Every rule that guards the catalog (positive prices, known difficulty
//! tags, known outcome tags) reports through [`ValidationError`]. Stores and
//! the battle engine wrap it into their own error types.

/// Severity level of an error, used for categorization by callers.
///
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Conflict**: Input is well-formed but clashes with existing catalog state
/// - **Internal**: Unexpected infrastructure failure that requires investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: negative price, unknown difficulty tag
    Validation,

    /// Request conflicts with current state.
    ///
    /// Examples: duplicate meal name, meal already deleted, full lineup
    Conflict,

    /// Infrastructure failure.
    ///
    /// Examples: poisoned lock, unreadable catalog file
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an infrastructure bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Input rejected before it reaches the catalog.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("Invalid price: {0:.2}. Price must be a positive number.")]
    InvalidPrice(f64),

    #[error("Invalid difficulty level: {0}. Must be 'LOW', 'MED', or 'HIGH'.")]
    UnknownDifficulty(String),

    #[error("Invalid result: {0}. Expected 'win' or 'loss'.")]
    UnknownOutcome(String),

    #[error("Invalid sort_by parameter: {0}. Expected 'wins' or 'win_pct'.")]
    UnknownSortKey(String),

    #[error("Meal name must not be empty")]
    EmptyName,

    #[error("Cuisine must not be empty")]
    EmptyCuisine,
}

impl ValidationError {
    pub const fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}
