//! File-based MealRepository implementation.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use meal_core::{LeaderboardEntry, LeaderboardSort, Meal, MealId, NewMeal, Outcome, rank};

use super::SchemaBootstrap;
use crate::error::Result;
use crate::repository::types::Catalog;
use crate::repository::{MealRepository, RepositoryError};

/// File-based implementation of MealRepository.
///
/// Stores the whole catalog as one JSON document (see [`Catalog`]).
///
/// # Write Protocol
///
/// Every mutation is serialized on a single lock and runs in three steps:
/// 1. Apply the change to a copy of the catalog
/// 2. Persist the copy (temp file + atomic rename)
/// 3. Swap the copy in as the current catalog
///
/// A failure in steps 1 or 2 leaves both the file and memory untouched.
pub struct FileMealRepository {
    path: PathBuf,
    bootstrap: SchemaBootstrap,
    catalog: Mutex<Catalog>,
}

impl FileMealRepository {
    /// Open the catalog at `path`, creating it through `bootstrap` if missing.
    pub fn open(path: impl AsRef<Path>, bootstrap: SchemaBootstrap) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let catalog = if path.exists() {
            Catalog::load(&path)?
        } else {
            bootstrap.recreate(&path)?
        };

        tracing::info!(
            "Opened meal catalog {} ({} meals)",
            path.display(),
            catalog.meals.len()
        );

        Ok(Self {
            path,
            bootstrap,
            catalog: Mutex::new(catalog),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Catalog>> {
        Ok(self
            .catalog
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?)
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let mut current = self.lock()?;
        let mut draft = current.clone();

        let value = op(&mut draft)?;
        draft.persist(&self.path)?;

        *current = draft;
        Ok(value)
    }
}

impl MealRepository for FileMealRepository {
    fn create(&self, meal: NewMeal) -> Result<MealId> {
        let name = meal.name.clone();
        let id = self.mutate(|catalog| catalog.insert(meal)).inspect_err(|e| {
            tracing::warn!("Failed to create meal '{}': {}", name, e);
        })?;

        tracing::info!("Meal successfully added to the database: {}", name);
        Ok(id)
    }

    fn get_by_id(&self, id: MealId) -> Result<Meal> {
        self.lock()?.live(id).cloned()
    }

    fn get_by_name(&self, name: &str) -> Result<Meal> {
        self.lock()?.live_by_name(name).cloned()
    }

    fn delete(&self, id: MealId) -> Result<()> {
        self.mutate(|catalog| catalog.mark_deleted(id))?;
        tracing::info!("Meal with ID {} marked as deleted", id);
        Ok(())
    }

    fn record_result(&self, id: MealId, outcome: Outcome) -> Result<Meal> {
        let meal = self.mutate(|catalog| catalog.record(id, outcome))?;
        tracing::debug!(
            "Recorded {} for meal {}: battles={}, wins={}",
            outcome,
            id,
            meal.battles,
            meal.wins
        );
        Ok(meal)
    }

    fn record_battle(&self, winner: MealId, loser: MealId) -> Result<(Meal, Meal)> {
        let (won, lost) = self.mutate(|catalog| catalog.record_battle(winner, loser))?;
        tracing::debug!(
            "Recorded battle: {} beat {} (wins: {} / {})",
            won.name,
            lost.name,
            won.wins,
            lost.wins
        );
        Ok((won, lost))
    }

    fn leaderboard(
        &self,
        sort: LeaderboardSort,
        limit: Option<usize>,
    ) -> Result<Vec<LeaderboardEntry>> {
        Ok(rank(self.lock()?.live_meals(), sort, limit))
    }

    fn list(&self) -> Result<Vec<Meal>> {
        Ok(self.lock()?.live_meals().cloned().collect())
    }

    fn reset_all(&self) -> Result<()> {
        let mut current = self.lock()?;
        *current = self.bootstrap.recreate(&self.path)?;

        tracing::info!("Meals cleared from {}", self.path.display());
        Ok(())
    }
}
