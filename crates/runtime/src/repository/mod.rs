//! Repository layer for the meal catalog.
//!
//! Repositories own the durable meal records and their battle statistics:
//! - In-memory arena for tests and throwaway sessions
//! - JSON catalog file for persistent use
//!
//! Both share the ranking and validation rules from `meal-core`.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::RepositoryError;
pub use file::{FileMealRepository, SchemaBootstrap};
pub use memory::InMemoryMealRepository;
pub use traits::MealRepository;
pub use types::{Catalog, SchemaHeader};
