//! Subcommand implementations.
//!
//! Each command carries its own clap arguments and runs against an opened
//! [`Kitchen`].

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use meal_core::{LeaderboardEntry, LeaderboardSort, Meal, MealId};
use meal_runtime::{BattleEngine, KitchenConfig, MealRepository};

/// Store and settings shared by every command.
pub struct Kitchen {
    pub config: KitchenConfig,
    pub store: Arc<dyn MealRepository>,
}

impl Kitchen {
    pub fn open(config: KitchenConfig) -> Result<Self> {
        let store = config
            .open_repository()
            .with_context(|| format!("failed to open {} meal store", config.store))?;
        Ok(Self { config, store })
    }
}

/// Add a meal to the catalog
#[derive(Parser, Debug)]
pub struct Create {
    /// Unique meal name
    pub name: String,

    pub cuisine: String,

    /// Positive price
    pub price: f64,

    /// LOW, MED or HIGH
    pub difficulty: String,
}

impl Create {
    pub fn execute(self, kitchen: &Kitchen) -> Result<()> {
        let id = kitchen
            .store
            .create_meal(&self.name, &self.cuisine, self.price, &self.difficulty)?;
        println!("Created meal {} with ID {}", self.name, id);
        Ok(())
    }
}

/// Look up a meal by id or name
#[derive(Parser, Debug)]
pub struct Get {
    #[command(flatten)]
    pub key: LookupKey,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct LookupKey {
    #[arg(long)]
    pub id: Option<u32>,

    #[arg(long)]
    pub name: Option<String>,
}

impl Get {
    pub fn execute(self, kitchen: &Kitchen) -> Result<()> {
        let meal = match (self.key.id, self.key.name) {
            (Some(id), _) => kitchen.store.get_by_id(MealId::from(id))?,
            (None, Some(name)) => kitchen.store.get_by_name(&name)?,
            (None, None) => anyhow::bail!("either --id or --name is required"),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&meal)?);
        } else {
            println!("{}", describe(&meal));
        }
        Ok(())
    }
}

/// Soft-delete a meal
#[derive(Parser, Debug)]
pub struct Delete {
    pub id: u32,
}

impl Delete {
    pub fn execute(self, kitchen: &Kitchen) -> Result<()> {
        kitchen.store.delete(MealId::from(self.id))?;
        println!("Deleted meal {}", self.id);
        Ok(())
    }
}

/// List live meals
#[derive(Parser, Debug)]
pub struct List {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl List {
    pub fn execute(self, kitchen: &Kitchen) -> Result<()> {
        let meals = kitchen.store.list()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&meals)?);
        } else if meals.is_empty() {
            println!("No meals in the catalog");
        } else {
            for meal in &meals {
                println!("{}", describe(meal));
            }
        }
        Ok(())
    }
}

/// Battle two meals by name and print the winner
#[derive(Parser, Debug)]
pub struct Battle {
    pub first: String,

    pub second: String,

    /// Seed the random draw (overrides MEAL_RNG_SEED)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Battle {
    pub fn execute(self, kitchen: &Kitchen) -> Result<()> {
        let config = match self.seed {
            Some(seed) => kitchen.config.clone().with_seed(seed),
            None => kitchen.config.clone(),
        };

        let mut engine = BattleEngine::new(kitchen.store.clone(), config.random_source());
        engine.prep_combatant(&self.first)?;
        engine.prep_combatant(&self.second)?;

        for meal in engine.combatants() {
            println!("{:<24} score {:.2}", meal.name, engine.score(meal));
        }

        let winner = engine.resolve()?;
        println!("Winner: {}", winner);
        Ok(())
    }
}

/// Rank meals that have fought at least once
#[derive(Parser, Debug)]
pub struct Leaderboard {
    /// `wins` or `win_pct`
    #[arg(long, default_value = "wins")]
    pub sort: String,

    #[arg(long)]
    pub limit: Option<usize>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl Leaderboard {
    pub fn execute(self, kitchen: &Kitchen) -> Result<()> {
        let sort = LeaderboardSort::from_key(&self.sort)?;
        let entries = kitchen.store.leaderboard(sort, self.limit)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else if entries.is_empty() {
            println!("No battles fought yet");
        } else {
            for (rank, entry) in entries.iter().enumerate() {
                println!("{:>3}. {}", rank + 1, standing(entry));
            }
        }
        Ok(())
    }
}

/// Drop every meal and recreate the table.
pub fn reset(kitchen: &Kitchen) -> Result<()> {
    kitchen.store.reset_all()?;
    println!("Meals cleared");
    Ok(())
}

fn describe(meal: &Meal) -> String {
    format!(
        "[{}] {} ({}) ${:.2} {} - {} battles, {} wins",
        meal.id, meal.name, meal.cuisine, meal.price, meal.difficulty, meal.battles, meal.wins
    )
}

fn standing(entry: &LeaderboardEntry) -> String {
    format!(
        "{:<24} {:>4} wins / {:>4} battles  {:>6.1}%",
        entry.name,
        entry.wins,
        entry.battles,
        entry.win_pct * 100.0
    )
}
