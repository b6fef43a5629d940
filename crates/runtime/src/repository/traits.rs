//! Repository contract for the meal catalog.

use meal_core::{Difficulty, LeaderboardEntry, LeaderboardSort, Meal, MealId, NewMeal, Outcome};

use crate::error::Result;

/// Durable store of meals and their battle statistics.
///
/// Implementations guarantee:
/// - Ids are assigned on insert and never reused until [`reset_all`](Self::reset_all)
/// - Names are unique across all records, deleted ones included
/// - Every mutation is all-or-nothing
/// - Concurrent [`record_result`](Self::record_result) calls never lose an increment
pub trait MealRepository: Send + Sync {
    /// Insert a validated meal with zeroed statistics.
    fn create(&self, meal: NewMeal) -> Result<MealId>;

    /// Load a live meal by id.
    fn get_by_id(&self, id: MealId) -> Result<Meal>;

    /// Load a live meal by name.
    fn get_by_name(&self, name: &str) -> Result<Meal>;

    /// Soft-delete a meal. Its record and statistics are retained.
    fn delete(&self, id: MealId) -> Result<()>;

    /// Count one battle for a live meal, and one win if `outcome` is a win.
    ///
    /// Returns the updated record.
    fn record_result(&self, id: MealId, outcome: Outcome) -> Result<Meal>;

    /// Record one finished battle: a win for `winner` and a loss for `loser`.
    ///
    /// Both meals are checked before either is touched, so the outcome is
    /// applied to both records or to neither. Returns `(winner, loser)` as
    /// updated. A meal fighting itself gains one win and two battles.
    fn record_battle(&self, winner: MealId, loser: MealId) -> Result<(Meal, Meal)>;

    /// Live meals with at least one battle, ranked by `sort`.
    fn leaderboard(
        &self,
        sort: LeaderboardSort,
        limit: Option<usize>,
    ) -> Result<Vec<LeaderboardEntry>>;

    /// All live meals in id order.
    fn list(&self) -> Result<Vec<Meal>>;

    /// Drop every meal and restart ids at 1.
    fn reset_all(&self) -> Result<()>;

    /// Validate raw attributes and insert the meal.
    ///
    /// `difficulty` must be one of `LOW`, `MED`, `HIGH`.
    fn create_meal(
        &self,
        name: &str,
        cuisine: &str,
        price: f64,
        difficulty: &str,
    ) -> Result<MealId> {
        let difficulty = Difficulty::from_tag(difficulty)?;
        self.create(NewMeal::new(name, cuisine, price, difficulty)?)
    }

    /// [`record_result`](Self::record_result) with a textual `win` / `loss` tag.
    fn record_result_tag(&self, id: MealId, outcome: &str) -> Result<Meal> {
        self.record_result(id, Outcome::from_tag(outcome)?)
    }
}
