//! Runtime for the Meal Max kitchen.
//!
//! This crate wires the pure battle rules from `meal-core` to storage and
//! randomness. Consumers open a [`MealRepository`] through [`KitchenConfig`]
//! and run battles with [`BattleEngine`].
//!
//! Modules are organized by responsibility:
//! - [`repository`] hosts the store contract and its in-memory and file backends
//! - [`battle`] holds the stateful two-combatant engine
//! - [`config`] loads settings from the environment
//! - [`random`] provides the thread RNG source
pub mod battle;
pub mod config;
pub mod error;
pub mod random;
pub mod repository;

pub use battle::BattleEngine;
pub use config::{KitchenConfig, StoreBackend};
pub use error::{KitchenError, MealKey, Result};
pub use random::ThreadRandom;
pub use repository::{
    FileMealRepository, InMemoryMealRepository, MealRepository, RepositoryError, SchemaBootstrap,
};
