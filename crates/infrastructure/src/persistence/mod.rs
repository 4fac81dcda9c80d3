//! File-backed sources for schemas and the endpoint catalog.

mod catalog_file;
mod schema_directory;

pub use catalog_file::{FileCatalogSource, StaticCatalog};
pub use schema_directory::FileSchemaSource;
