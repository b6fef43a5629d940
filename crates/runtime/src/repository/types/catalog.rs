//! Catalog document: the whole meals table as one serializable value.
//!
//! # Layout
//!
//! ```text
//! { "table": "meals", "schema_version": 1, "next_id": 3,
//!   "meals": [ { "id": 1, "meal": "...", "cuisine": "...", "price": 10.0,
//!                "difficulty": "LOW", "battles": 0, "wins": 0, "deleted": false } ] }
//! ```
//!
//! Meals are kept sorted by id, so lookups by id are binary searches.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use meal_core::{Meal, MealId, NewMeal, Outcome};
use serde::{Deserialize, Serialize};

use super::SchemaHeader;
use crate::error::{KitchenError, MealKey, Result};
use crate::repository::RepositoryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(flatten)]
    pub header: SchemaHeader,

    /// Id handed to the next inserted meal
    pub next_id: MealId,

    pub meals: Vec<Meal>,
}

impl Catalog {
    pub fn empty(header: SchemaHeader) -> Self {
        Self {
            header,
            next_id: MealId::FIRST,
            meals: Vec::new(),
        }
    }

    /// Read and validate a catalog document.
    pub fn load(path: &Path) -> std::result::Result<Self, RepositoryError> {
        let json = fs::read_to_string(path)?;
        let catalog: Catalog =
            serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;
        catalog.validate()?;

        tracing::debug!(
            "Loaded catalog with {} meals from {}",
            catalog.meals.len(),
            path.display()
        );

        Ok(catalog)
    }

    /// Write the document next to `path`, then atomically rename it into place.
    pub fn persist(&self, path: &Path) -> std::result::Result<(), RepositoryError> {
        let temp_path = path.with_extension("json.tmp");

        let json =
            serde_json::to_string_pretty(self).map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        tracing::debug!("Saved catalog: {}", path.display());

        Ok(())
    }

    /// Check the invariants a loaded document must satisfy.
    pub fn validate(&self) -> std::result::Result<(), RepositoryError> {
        self.header.check_stored()?;

        let mut names = HashSet::with_capacity(self.meals.len());
        let mut previous: Option<MealId> = None;

        for meal in &self.meals {
            if previous.is_some_and(|prev| prev >= meal.id) {
                return Err(RepositoryError::CorruptedData(format!(
                    "meal ids out of order or duplicated at {}",
                    meal.id
                )));
            }
            if meal.id.0 == 0 || meal.id >= self.next_id {
                return Err(RepositoryError::CorruptedData(format!(
                    "meal id {} outside assigned range (next id {})",
                    meal.id, self.next_id
                )));
            }
            if !names.insert(meal.name.as_str()) {
                return Err(RepositoryError::CorruptedData(format!(
                    "duplicate meal name '{}'",
                    meal.name
                )));
            }
            if meal.name.trim().is_empty() || meal.cuisine.trim().is_empty() {
                return Err(RepositoryError::CorruptedData(format!(
                    "meal {} has a blank name or cuisine",
                    meal.id
                )));
            }
            if !meal.price.is_finite() || meal.price <= 0.0 {
                return Err(RepositoryError::CorruptedData(format!(
                    "meal {} has invalid price {}",
                    meal.id, meal.price
                )));
            }
            if meal.wins > meal.battles {
                return Err(RepositoryError::CorruptedData(format!(
                    "meal {} has {} wins but only {} battles",
                    meal.id, meal.wins, meal.battles
                )));
            }
            previous = Some(meal.id);
        }

        Ok(())
    }

    /// Insert a validated meal. Names must be unique across all records.
    pub fn insert(&mut self, new: NewMeal) -> Result<MealId> {
        if self.meals.iter().any(|m| m.name == new.name) {
            return Err(KitchenError::Duplicate { name: new.name });
        }

        let id = self.next_id;
        self.meals.push(Meal::from_new(id, new));
        self.next_id = id.next();
        Ok(id)
    }

    fn position(&self, id: MealId) -> Option<usize> {
        self.meals.binary_search_by_key(&id, |m| m.id).ok()
    }

    /// Live meal by id.
    pub fn live(&self, id: MealId) -> Result<&Meal> {
        self.position(id)
            .map(|pos| &self.meals[pos])
            .filter(|m| !m.deleted)
            .ok_or(KitchenError::NotFound(MealKey::Id(id)))
    }

    /// Live meal by name.
    pub fn live_by_name(&self, name: &str) -> Result<&Meal> {
        self.meals
            .iter()
            .find(|m| m.name == name && !m.deleted)
            .ok_or_else(|| KitchenError::NotFound(MealKey::Name(name.to_owned())))
    }

    /// Position of an existing, not yet deleted meal, for mutation.
    fn live_position(&self, id: MealId) -> Result<usize> {
        let pos = self
            .position(id)
            .ok_or(KitchenError::NotFound(MealKey::Id(id)))?;
        if self.meals[pos].deleted {
            return Err(KitchenError::AlreadyDeleted { id });
        }
        Ok(pos)
    }

    pub fn mark_deleted(&mut self, id: MealId) -> Result<()> {
        let pos = self.live_position(id)?;
        self.meals[pos].deleted = true;
        Ok(())
    }

    pub fn record(&mut self, id: MealId, outcome: Outcome) -> Result<Meal> {
        let pos = self.live_position(id)?;
        let meal = &mut self.meals[pos];
        meal.record(outcome)?;
        Ok(meal.clone())
    }

    /// Win for `winner` and loss for `loser`, checked in full before either
    /// record changes.
    pub fn record_battle(&mut self, winner: MealId, loser: MealId) -> Result<(Meal, Meal)> {
        let won_at = self.live_position(winner)?;
        let lost_at = self.live_position(loser)?;

        let mut won = self.meals[won_at].clone();
        won.record(Outcome::Win)?;
        let mut lost = if won_at == lost_at {
            won.clone()
        } else {
            self.meals[lost_at].clone()
        };
        lost.record(Outcome::Loss)?;

        self.meals[won_at] = won;
        self.meals[lost_at] = lost;
        Ok((self.meals[won_at].clone(), self.meals[lost_at].clone()))
    }

    pub fn live_meals(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter().filter(|m| !m.deleted)
    }
}

#[cfg(test)]
mod tests {
    use meal_core::Difficulty;
    use tempfile::TempDir;

    use super::*;

    fn new_meal(name: &str) -> NewMeal {
        NewMeal::new(name, "Cuisine", 10.0, Difficulty::Low).unwrap()
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut catalog = Catalog::empty(SchemaHeader::default());
        assert_eq!(catalog.insert(new_meal("A")).unwrap(), MealId(1));
        assert_eq!(catalog.insert(new_meal("B")).unwrap(), MealId(2));
        assert_eq!(catalog.next_id, MealId(3));
    }

    #[test]
    fn deleted_names_stay_reserved() {
        let mut catalog = Catalog::empty(SchemaHeader::default());
        let id = catalog.insert(new_meal("A")).unwrap();
        catalog.mark_deleted(id).unwrap();

        assert!(matches!(
            catalog.insert(new_meal("A")),
            Err(KitchenError::Duplicate { name }) if name == "A"
        ));
    }

    #[test]
    fn deleted_meals_are_hidden_but_distinguished_on_mutation() {
        let mut catalog = Catalog::empty(SchemaHeader::default());
        let id = catalog.insert(new_meal("A")).unwrap();
        catalog.mark_deleted(id).unwrap();

        assert!(matches!(catalog.live(id), Err(KitchenError::NotFound(_))));
        assert!(matches!(
            catalog.live_by_name("A"),
            Err(KitchenError::NotFound(_))
        ));
        assert!(matches!(
            catalog.record(id, Outcome::Win),
            Err(KitchenError::AlreadyDeleted { .. })
        ));
        assert!(matches!(
            catalog.mark_deleted(MealId(42)),
            Err(KitchenError::NotFound(MealKey::Id(MealId(42))))
        ));
    }

    #[test]
    fn record_battle_is_all_or_nothing() {
        let mut catalog = Catalog::empty(SchemaHeader::default());
        let a = catalog.insert(new_meal("A")).unwrap();
        let b = catalog.insert(new_meal("B")).unwrap();

        let (won, lost) = catalog.record_battle(b, a).unwrap();
        assert_eq!((won.battles, won.wins), (1, 1));
        assert_eq!((lost.battles, lost.wins), (1, 0));

        catalog.mark_deleted(a).unwrap();
        assert!(matches!(
            catalog.record_battle(b, a),
            Err(KitchenError::AlreadyDeleted { id }) if id == a
        ));
        assert_eq!(catalog.live(b).unwrap().battles, 1);
    }

    #[test]
    fn record_battle_against_itself() {
        let mut catalog = Catalog::empty(SchemaHeader::default());
        let a = catalog.insert(new_meal("A")).unwrap();

        let (won, lost) = catalog.record_battle(a, a).unwrap();
        assert_eq!(won, lost);
        assert_eq!((won.battles, won.wins), (2, 1));
    }

    #[test]
    fn saturated_counters_report_instead_of_panicking() {
        let mut catalog = Catalog::empty(SchemaHeader::default());
        let a = catalog.insert(new_meal("A")).unwrap();
        let b = catalog.insert(new_meal("B")).unwrap();
        catalog.meals[0].battles = u32::MAX;

        assert!(matches!(
            catalog.record(a, Outcome::Loss),
            Err(KitchenError::Repository(RepositoryError::CorruptedData(_)))
        ));
        // loser overflows, so the winner keeps its old stats too
        assert!(catalog.record_battle(b, a).is_err());
        assert_eq!(catalog.live(b).unwrap().battles, 0);
    }

    #[test]
    fn persist_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meals.json");

        let mut catalog = Catalog::empty(SchemaHeader::default());
        let id = catalog.insert(new_meal("A")).unwrap();
        catalog.record(id, Outcome::Win).unwrap();
        catalog.persist(&path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(Catalog::load(&path).unwrap(), catalog);
    }

    #[test]
    fn load_rejects_broken_invariants() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meals.json");

        let mut catalog = Catalog::empty(SchemaHeader::default());
        let id = catalog.insert(new_meal("A")).unwrap();
        catalog.meals[0].wins = 3;
        catalog.meals[0].battles = 1;
        catalog.persist(&path).unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(RepositoryError::CorruptedData(_))
        ));

        catalog.meals[0].wins = 0;
        catalog.meals.push(catalog.meals[0].clone());
        catalog.meals[1].id = id;
        catalog.persist(&path).unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(RepositoryError::CorruptedData(_))
        ));

        let mut bad_attributes = Catalog::empty(SchemaHeader::default());
        bad_attributes.insert(new_meal("A")).unwrap();
        bad_attributes.meals[0].price = -5.0;
        bad_attributes.persist(&path).unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(RepositoryError::CorruptedData(_))
        ));

        bad_attributes.meals[0].price = 5.0;
        bad_attributes.meals[0].cuisine = String::new();
        bad_attributes.persist(&path).unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(RepositoryError::CorruptedData(_))
        ));

        let mut wrong_version = Catalog::empty(SchemaHeader::default());
        wrong_version.header.schema_version = 99;
        wrong_version.persist(&path).unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
