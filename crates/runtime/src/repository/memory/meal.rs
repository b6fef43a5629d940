//! In-memory meal repository implementation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use meal_core::{LeaderboardEntry, LeaderboardSort, Meal, MealId, NewMeal, Outcome, rank};

use crate::error::{KitchenError, MealKey, Result};
use crate::repository::{MealRepository, RepositoryError};

/// Arena of meal slots. Slot `i` holds the meal with id `i + 1`.
#[derive(Default)]
struct Arena {
    slots: Vec<Mutex<Meal>>,
    by_name: HashMap<String, MealId>,
}

impl Arena {
    fn slot(&self, id: MealId) -> Result<&Mutex<Meal>> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.slots.get(index))
            .ok_or(KitchenError::NotFound(MealKey::Id(id)))
    }
}

/// In-memory meal repository for testing and development.
///
/// Thread-safe but not persistent across process restarts. Each record sits
/// behind its own lock, so stat updates for different meals do not contend;
/// the arena lock is only taken exclusively to insert or reset.
#[derive(Default)]
pub struct InMemoryMealRepository {
    arena: RwLock<Arena>,
}

impl InMemoryMealRepository {
    /// Create a new empty in-memory meal repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Arena>> {
        Ok(self
            .arena
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Arena>> {
        Ok(self
            .arena
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?)
    }

    fn lock(slot: &Mutex<Meal>) -> Result<MutexGuard<'_, Meal>> {
        Ok(slot.lock().map_err(|_| RepositoryError::LockPoisoned)?)
    }

    fn snapshot(arena: &Arena) -> Result<Vec<Meal>> {
        arena
            .slots
            .iter()
            .map(|slot| Self::lock(slot).map(|meal| meal.clone()))
            .collect()
    }

    /// Lock a meal that exists and is not deleted.
    fn live_mut<'a>(arena: &'a Arena, id: MealId) -> Result<MutexGuard<'a, Meal>> {
        let meal = Self::lock(arena.slot(id)?)?;
        if meal.deleted {
            return Err(KitchenError::AlreadyDeleted { id });
        }
        Ok(meal)
    }
}

impl MealRepository for InMemoryMealRepository {
    fn create(&self, meal: NewMeal) -> Result<MealId> {
        let mut arena = self.write()?;

        if arena.by_name.contains_key(&meal.name) {
            tracing::warn!("Meal with name '{}' already exists", meal.name);
            return Err(KitchenError::Duplicate { name: meal.name });
        }

        let id = MealId(arena.slots.len() as u32 + 1);
        arena.by_name.insert(meal.name.clone(), id);
        tracing::info!("Meal successfully added to the database: {}", meal.name);
        arena.slots.push(Mutex::new(Meal::from_new(id, meal)));

        Ok(id)
    }

    fn get_by_id(&self, id: MealId) -> Result<Meal> {
        let arena = self.read()?;
        let meal = Self::lock(arena.slot(id)?)?;
        if meal.deleted {
            tracing::debug!("Meal with ID {} has been deleted", id);
            return Err(KitchenError::NotFound(MealKey::Id(id)));
        }
        Ok(meal.clone())
    }

    fn get_by_name(&self, name: &str) -> Result<Meal> {
        let arena = self.read()?;
        let not_found = || KitchenError::NotFound(MealKey::Name(name.to_owned()));

        let id = *arena.by_name.get(name).ok_or_else(not_found)?;
        let meal = Self::lock(arena.slot(id)?)?;
        if meal.deleted {
            return Err(not_found());
        }
        Ok(meal.clone())
    }

    fn delete(&self, id: MealId) -> Result<()> {
        let arena = self.read()?;
        let mut meal = Self::live_mut(&arena, id)?;
        meal.deleted = true;

        tracing::info!("Meal with ID {} marked as deleted", id);
        Ok(())
    }

    fn record_result(&self, id: MealId, outcome: Outcome) -> Result<Meal> {
        let arena = self.read()?;
        let mut meal = Self::live_mut(&arena, id)?;
        meal.record(outcome)?;

        tracing::debug!(
            "Recorded {} for meal {}: battles={}, wins={}",
            outcome,
            id,
            meal.battles,
            meal.wins
        );
        Ok(meal.clone())
    }

    fn record_battle(&self, winner: MealId, loser: MealId) -> Result<(Meal, Meal)> {
        let arena = self.read()?;

        if winner == loser {
            let mut meal = Self::live_mut(&arena, winner)?;
            let mut staged = meal.clone();
            staged.record(Outcome::Win)?;
            staged.record(Outcome::Loss)?;
            *meal = staged;
            return Ok((meal.clone(), meal.clone()));
        }

        // Slots are always locked in id order.
        let (mut won, mut lost) = if winner < loser {
            let won = Self::live_mut(&arena, winner)?;
            (won, Self::live_mut(&arena, loser)?)
        } else {
            let lost = Self::live_mut(&arena, loser)?;
            (Self::live_mut(&arena, winner)?, lost)
        };

        let mut staged_won = won.clone();
        staged_won.record(Outcome::Win)?;
        let mut staged_lost = lost.clone();
        staged_lost.record(Outcome::Loss)?;
        *won = staged_won;
        *lost = staged_lost;

        tracing::debug!("Recorded battle: {} beat {}", won.name, lost.name);
        Ok((won.clone(), lost.clone()))
    }

    fn leaderboard(
        &self,
        sort: LeaderboardSort,
        limit: Option<usize>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let meals = Self::snapshot(&*self.read()?)?;
        Ok(rank(&meals, sort, limit))
    }

    fn list(&self) -> Result<Vec<Meal>> {
        let mut meals = Self::snapshot(&*self.read()?)?;
        meals.retain(|m| !m.deleted);
        Ok(meals)
    }

    fn reset_all(&self) -> Result<()> {
        let mut arena = self.write()?;
        *arena = Arena::default();

        tracing::info!("Meals cleared from the in-memory catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use meal_core::Difficulty;

    use super::*;

    fn repo_with(names: &[&str]) -> InMemoryMealRepository {
        let repo = InMemoryMealRepository::new();
        for name in names {
            repo.create_meal(name, "Cuisine", 10.0, "MED").unwrap();
        }
        repo
    }

    #[test]
    fn create_and_get() {
        let repo = InMemoryMealRepository::new();
        let id = repo
            .create_meal("Meal Name", "Cuisine Name", 20.0, "MED")
            .unwrap();
        assert_eq!(id, MealId(1));

        let meal = repo.get_by_id(id).unwrap();
        assert_eq!(meal.name, "Meal Name");
        assert_eq!(meal.cuisine, "Cuisine Name");
        assert_eq!(meal.price, 20.0);
        assert_eq!(meal.difficulty, Difficulty::Med);
        assert_eq!((meal.battles, meal.wins, meal.deleted), (0, 0, false));

        assert_eq!(repo.get_by_name("Meal Name").unwrap(), meal);
    }

    #[test]
    fn create_rejects_invalid_input() {
        let repo = InMemoryMealRepository::new();

        assert!(matches!(
            repo.create_meal("X", "Cuisine", -1.0, "LOW"),
            Err(KitchenError::Validation(_))
        ));
        assert!(matches!(
            repo.create_meal("X", "Cuisine", 10.0, "EXTREME"),
            Err(KitchenError::Validation(_))
        ));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let repo = repo_with(&["Meal Name"]);
        let err = repo
            .create_meal("Meal Name", "Other", 5.0, "HIGH")
            .unwrap_err();
        assert!(matches!(err, KitchenError::Duplicate { .. }));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn unknown_ids() {
        let repo = repo_with(&["A"]);
        for id in [MealId(0), MealId(2), MealId(999)] {
            assert!(matches!(
                repo.get_by_id(id),
                Err(KitchenError::NotFound(MealKey::Id(missing))) if missing == id
            ));
        }
        assert!(matches!(
            repo.get_by_name("B"),
            Err(KitchenError::NotFound(MealKey::Name(_)))
        ));
    }

    #[test]
    fn delete_twice() {
        let repo = repo_with(&["A"]);
        repo.delete(MealId(1)).unwrap();

        assert!(matches!(
            repo.delete(MealId(1)),
            Err(KitchenError::AlreadyDeleted { id: MealId(1) })
        ));
        assert!(matches!(
            repo.get_by_id(MealId(1)),
            Err(KitchenError::NotFound(_))
        ));
        assert!(matches!(
            repo.get_by_name("A"),
            Err(KitchenError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(MealId(7)),
            Err(KitchenError::NotFound(_))
        ));
    }

    #[test]
    fn record_result_updates_stats() {
        let repo = repo_with(&["A"]);
        let id = MealId(1);

        for outcome in ["win", "loss", "win", "loss", "loss"] {
            repo.record_result_tag(id, outcome).unwrap();
        }
        let meal = repo.get_by_id(id).unwrap();
        assert_eq!((meal.battles, meal.wins), (5, 2));

        let won = repo.record_result(id, Outcome::Win).unwrap();
        assert_eq!((won.battles, won.wins), (6, 3));
        let lost = repo.record_result(id, Outcome::Loss).unwrap();
        assert_eq!((lost.battles, lost.wins), (7, 3));
    }

    #[test]
    fn record_result_rejects_bad_targets() {
        let repo = repo_with(&["A"]);

        assert!(matches!(
            repo.record_result_tag(MealId(1), "draw"),
            Err(KitchenError::Validation(_))
        ));
        assert!(matches!(
            repo.record_result(MealId(9), Outcome::Win),
            Err(KitchenError::NotFound(_))
        ));

        repo.delete(MealId(1)).unwrap();
        assert!(matches!(
            repo.record_result(MealId(1), Outcome::Win),
            Err(KitchenError::AlreadyDeleted { .. })
        ));

        // failed calls leave statistics untouched
        let arena = repo.read().unwrap();
        let meal = InMemoryMealRepository::lock(arena.slot(MealId(1)).unwrap()).unwrap();
        assert_eq!((meal.battles, meal.wins), (0, 0));
    }

    #[test]
    fn record_battle_checks_both_meals_first() {
        let repo = repo_with(&["A", "B", "C"]);
        let (a, b, c) = (MealId(1), MealId(2), MealId(3));

        let (won, lost) = repo.record_battle(c, a).unwrap();
        assert_eq!((won.id, won.wins, won.battles), (c, 1, 1));
        assert_eq!((lost.id, lost.wins, lost.battles), (a, 0, 1));

        repo.delete(a).unwrap();
        assert!(matches!(
            repo.record_battle(b, a),
            Err(KitchenError::AlreadyDeleted { id }) if id == a
        ));
        assert!(matches!(
            repo.record_battle(MealId(9), b),
            Err(KitchenError::NotFound(_))
        ));
        assert_eq!(repo.get_by_id(b).unwrap().battles, 0);

        let (won, lost) = repo.record_battle(b, b).unwrap();
        assert_eq!(won, lost);
        assert_eq!((won.battles, won.wins), (2, 1));
    }

    #[test]
    fn saturated_counter_is_reported() {
        let repo = repo_with(&["A", "B"]);
        {
            let arena = repo.read().unwrap();
            InMemoryMealRepository::lock(arena.slot(MealId(1)).unwrap())
                .unwrap()
                .battles = u32::MAX;
        }

        assert!(matches!(
            repo.record_result(MealId(1), Outcome::Win),
            Err(KitchenError::Repository(RepositoryError::CorruptedData(_)))
        ));
        assert!(repo.record_battle(MealId(2), MealId(1)).is_err());
        assert_eq!(repo.get_by_id(MealId(2)).unwrap().battles, 0);
    }

    #[test]
    fn leaderboard_filters_and_sorts() {
        let repo = repo_with(&["A", "B", "C", "D"]);
        let (a, b, c, d) = (MealId(1), MealId(2), MealId(3), MealId(4));

        for outcome in [Outcome::Win, Outcome::Win, Outcome::Loss, Outcome::Loss, Outcome::Loss] {
            repo.record_result(a, outcome).unwrap();
        }
        for _ in 0..2 {
            repo.record_result(b, Outcome::Win).unwrap();
        }
        repo.record_result(d, Outcome::Win).unwrap();
        repo.delete(d).unwrap();

        let board = repo.leaderboard(LeaderboardSort::Wins, None).unwrap();
        let ids: Vec<MealId> = board.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b, a]);
        assert!(!ids.contains(&c));
        assert_eq!(board[1].win_pct, 0.4);

        let board = repo.leaderboard(LeaderboardSort::WinPct, Some(1)).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id, b);
    }

    #[test]
    fn reset_restarts_ids() {
        let repo = repo_with(&["A", "B"]);
        repo.reset_all().unwrap();

        assert!(repo.list().unwrap().is_empty());
        assert!(matches!(
            repo.get_by_name("A"),
            Err(KitchenError::NotFound(_))
        ));
        assert_eq!(repo.create_meal("A", "Cuisine", 1.0, "LOW").unwrap(), MealId(1));
    }
}
