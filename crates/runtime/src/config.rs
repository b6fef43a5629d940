//! Kitchen configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use directories::ProjectDirs;
use meal_core::{PcgRandom, RandomSource};

use crate::error::Result;
use crate::random::ThreadRandom;
use crate::repository::{
    FileMealRepository, InMemoryMealRepository, MealRepository, SchemaBootstrap,
};

/// Which repository implementation backs the kitchen.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    Memory,
    #[default]
    File,
}

/// Settings needed to open a store and seed battles.
#[derive(Clone, Debug)]
pub struct KitchenConfig {
    pub store: StoreBackend,
    pub db_path: PathBuf,
    pub schema_template: Option<PathBuf>,
    pub rng_seed: Option<u64>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            db_path: default_db_path(),
            schema_template: None,
            rng_seed: None,
        }
    }
}

impl KitchenConfig {
    pub const DB_FILE: &'static str = "meals.json";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MEAL_STORE` - `memory` or `file` (default: file)
    /// - `MEAL_DB_PATH` - Catalog path (default: platform data dir)
    /// - `MEAL_SCHEMA_TEMPLATE` - Schema header template (default: built-in)
    /// - `MEAL_RNG_SEED` - Seed for reproducible battles (default: thread RNG)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(store) = read_var::<StoreBackend>(&lookup, "MEAL_STORE") {
            config.store = store;
        }

        if let Some(path) = lookup("MEAL_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        config.schema_template = lookup("MEAL_SCHEMA_TEMPLATE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        config.rng_seed = read_var::<u64>(&lookup, "MEAL_RNG_SEED");

        config
    }

    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Open the configured repository.
    pub fn open_repository(&self) -> Result<Arc<dyn MealRepository>> {
        match self.store {
            StoreBackend::Memory => {
                tracing::debug!("Using in-memory meal store");
                Ok(Arc::new(InMemoryMealRepository::new()))
            }
            StoreBackend::File => {
                let bootstrap = SchemaBootstrap::new(self.schema_template.clone());
                let repo = FileMealRepository::open(&self.db_path, bootstrap)?;
                Ok(Arc::new(repo))
            }
        }
    }

    /// Random source for battles: seeded PCG when a seed is set.
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.rng_seed {
            Some(seed) => Box::new(PcgRandom::new(seed)),
            None => Box::new(ThreadRandom),
        }
    }
}

/// `meals.json` in the platform data directory, or the working directory
/// when no home directory can be resolved.
pub fn default_db_path() -> PathBuf {
    ProjectDirs::from("", "", "meal-max")
        .map(|dirs| dirs.data_dir().join(KitchenConfig::DB_FILE))
        .unwrap_or_else(|| PathBuf::from(KitchenConfig::DB_FILE))
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
    }
    parsed
}
