//! Weighted-random winner selection.

/// Which combatant of an ordered pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The other combatant.
    pub const fn opposite(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Position in the lineup.
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Score gap scaled by 1/100 and wrapped into `[0, 1)`.
///
/// ```text
/// delta = (|score_a - score_b| / 100) mod 1
/// ```
///
/// The wrap is a modulo, not a clamp: a gap of exactly 100 yields 0.
pub fn normalized_delta(score_a: f64, score_b: f64) -> f64 {
    ((score_a - score_b).abs() / 100.0) % 1.0
}

/// Decide a battle from two scores and one draw in `[0, 1)`.
///
/// The first combatant wins when `roll < delta`; otherwise the second wins.
/// Equal scores therefore always go to the second combatant.
pub fn decide(score_a: f64, score_b: f64, roll: f64) -> Side {
    if roll < normalized_delta(score_a, score_b) {
        Side::First
    } else {
        Side::Second
    }
}
