//! Stateful battle engine.
//!
//! [`BattleEngine`] holds the combatants of one in-progress battle, resolves
//! it with the pure rules from `meal-core`, and records the outcome in the
//! injected [`MealRepository`]. An engine is owned by a single caller; share
//! it across threads only behind external locking.

use std::sync::Arc;

use meal_core::{Lineup, Meal, RandomSource, Side, decide, score};

use crate::error::{KitchenError, Result};
use crate::repository::MealRepository;

pub struct BattleEngine {
    store: Arc<dyn MealRepository>,
    rng: Box<dyn RandomSource>,
    lineup: Lineup,
}

impl BattleEngine {
    pub fn new(store: Arc<dyn MealRepository>, rng: Box<dyn RandomSource>) -> Self {
        Self {
            store,
            rng,
            lineup: Lineup::new(),
        }
    }

    /// Add a combatant to the battle.
    ///
    /// Fails with [`KitchenError::Capacity`] once two combatants are prepped.
    pub fn add_combatant(&mut self, meal: Meal) -> Result<()> {
        let name = meal.name.clone();
        self.lineup.push(meal).map_err(|full| {
            tracing::error!(
                "Attempted to add combatant '{}' but combatants list is full",
                full.0.name
            );
            KitchenError::from(full)
        })?;

        tracing::info!("Adding combatant '{}' to combatants list", name);
        Ok(())
    }

    /// Look a live meal up by name and add it as a combatant.
    pub fn prep_combatant(&mut self, name: &str) -> Result<()> {
        if self.lineup.is_full() {
            tracing::error!(
                "Attempted to add combatant '{}' but combatants list is full",
                name
            );
            return Err(KitchenError::Capacity);
        }
        let meal = self.store.get_by_name(name)?;
        self.add_combatant(meal)
    }

    /// Remove all combatants.
    pub fn clear(&mut self) {
        if self.lineup.is_empty() {
            tracing::info!("Clearing an empty battle");
            return;
        }
        tracing::info!("Clearing the combatants list");
        self.lineup.clear();
    }

    /// Battle score of `meal`.
    pub fn score(&self, meal: &Meal) -> f64 {
        score(meal)
    }

    /// Current combatants in the order they were added.
    pub fn combatants(&self) -> &[Meal] {
        self.lineup.as_slice()
    }

    pub fn len(&self) -> usize {
        self.lineup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lineup.is_empty()
    }

    /// Fight the two prepped combatants and return the winner's name.
    ///
    /// Draws one random value, records the win and the loss in one store
    /// call, then removes the loser. If recording fails neither meal's
    /// statistics change, the error is returned and the lineup is left as it
    /// was.
    pub fn resolve(&mut self) -> Result<String> {
        let Some((first, second)) = self.lineup.pair() else {
            tracing::error!(
                "Not enough combatants to start a battle ({} of {} prepped)",
                self.lineup.len(),
                Lineup::CAPACITY
            );
            return Err(KitchenError::InsufficientCombatants);
        };

        tracing::info!("Two meals enter, one meal leaves!");

        let score_a = score(first);
        let score_b = score(second);
        tracing::info!("Score for {}: {:.3}", first.name, score_a);
        tracing::info!("Score for {}: {:.3}", second.name, score_b);

        let roll = self.rng.next_unit();
        let side = decide(score_a, score_b, roll);

        let (winner, loser) = match side {
            Side::First => (first, second),
            Side::Second => (second, first),
        };
        let (winner_id, loser_id) = (winner.id, loser.id);
        let winner_name = winner.name.clone();

        tracing::info!(
            "Random draw {:.4} decides: {} beats {}",
            roll,
            winner.name,
            loser.name
        );

        self.store.record_battle(winner_id, loser_id)?;

        self.lineup.keep_only(side);

        Ok(winner_name)
    }
}
