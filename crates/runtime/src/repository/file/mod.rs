//! File-based repository implementations.

mod meal;
mod schema;

pub use meal::FileMealRepository;
pub use schema::SchemaBootstrap;
