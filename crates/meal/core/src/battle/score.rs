//! Meal battle score.

use crate::meal::Meal;

/// Calculate the battle score of a meal.
///
/// # Formula
///
/// ```text
/// score = price * len(cuisine) - penalty(difficulty)
/// penalty: HIGH = 1, MED = 2, LOW = 3
/// ```
///
/// `len(cuisine)` counts characters, not bytes.
pub fn score(meal: &Meal) -> f64 {
    let cuisine_len = meal.cuisine.chars().count() as f64;
    meal.price * cuisine_len - meal.difficulty.penalty()
}
