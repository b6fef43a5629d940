//! Shared types for repository layer.

mod catalog;
mod schema;

pub use catalog::Catalog;
pub use schema::SchemaHeader;
