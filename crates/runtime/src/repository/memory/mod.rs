//! In-memory repository implementations for testing and development.

mod meal;

pub use meal::InMemoryMealRepository;
