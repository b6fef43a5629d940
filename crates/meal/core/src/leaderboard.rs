//! Leaderboard ranking.
//!
//! Stores collect their live records and hand them to [`rank`], which applies
//! the eligibility filter and ordering shared by every backend.

use core::cmp::Ordering;

use crate::error::ValidationError;
use crate::meal::{Difficulty, Meal, MealId};

/// Leaderboard ordering key.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LeaderboardSort {
    /// Most wins first, ties broken by win percentage.
    #[default]
    Wins,
    /// Highest win percentage first.
    WinPct,
}

impl LeaderboardSort {
    /// Parses `wins` or `win_pct`.
    pub fn from_key(key: &str) -> Result<Self, ValidationError> {
        key.parse()
            .map_err(|_| ValidationError::UnknownSortKey(key.to_owned()))
    }
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    pub id: MealId,
    #[cfg_attr(feature = "serde", serde(rename = "meal"))]
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: u32,
    pub wins: u32,
    pub win_pct: f64,
}

impl LeaderboardEntry {
    /// Entry for a live meal that has fought at least once.
    pub fn from_meal(meal: &Meal) -> Option<Self> {
        if meal.deleted {
            return None;
        }
        let win_pct = meal.win_pct()?;
        Some(Self {
            id: meal.id,
            name: meal.name.clone(),
            cuisine: meal.cuisine.clone(),
            price: meal.price,
            difficulty: meal.difficulty,
            battles: meal.battles,
            wins: meal.wins,
            win_pct,
        })
    }
}

/// Build the leaderboard from a set of records.
///
/// Deleted meals and meals without battles are skipped. Remaining ties are
/// ordered by ascending id. `limit` truncates after sorting.
pub fn rank<'a>(
    meals: impl IntoIterator<Item = &'a Meal>,
    sort: LeaderboardSort,
    limit: Option<usize>,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = meals
        .into_iter()
        .filter_map(LeaderboardEntry::from_meal)
        .collect();

    entries.sort_by(|a, b| compare(sort, a, b));

    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}

fn compare(sort: LeaderboardSort, a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    let by_pct = b.win_pct.total_cmp(&a.win_pct);
    let primary = match sort {
        LeaderboardSort::Wins => b.wins.cmp(&a.wins).then(by_pct),
        LeaderboardSort::WinPct => by_pct,
    };
    primary.then(a.id.cmp(&b.id))
}
