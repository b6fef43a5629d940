//! Ordered pool of at most two combatants.

use arrayvec::ArrayVec;

use super::threshold::Side;
use crate::meal::Meal;

const CAPACITY: usize = 2;

/// Raised when a third combatant is pushed. Hands the rejected meal back.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("Combatant list is full, cannot add more combatants.")]
pub struct LineupFull(pub Meal);

/// Combatants for one battle round, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lineup {
    combatants: ArrayVec<Meal, CAPACITY>,
}

impl Lineup {
    pub const CAPACITY: usize = CAPACITY;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a combatant.
    pub fn push(&mut self, meal: Meal) -> Result<(), LineupFull> {
        self.combatants
            .try_push(meal)
            .map_err(|err| LineupFull(err.element()))
    }

    pub fn clear(&mut self) {
        self.combatants.clear();
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.combatants.is_full()
    }

    pub fn as_slice(&self) -> &[Meal] {
        &self.combatants
    }

    /// Both combatants, once the lineup is full.
    pub fn pair(&self) -> Option<(&Meal, &Meal)> {
        match self.combatants.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    /// Remove the combatant opposite `side`, leaving only the one on `side`.
    ///
    /// Returns the removed meal, or `None` unless the lineup is full.
    pub fn keep_only(&mut self, side: Side) -> Option<Meal> {
        if !self.is_full() {
            return None;
        }
        Some(self.combatants.remove(side.opposite().index()))
    }
}
