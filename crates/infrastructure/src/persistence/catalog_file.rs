//! Catalog sources.

use std::path::{Path, PathBuf};

use restprobe_application::ports::CatalogSource;
use restprobe_application::{ApplicationError, ApplicationResult};
use restprobe_domain::{CatalogDocument, EndpointCatalog};
use tokio::fs;

use crate::serialization::{DocumentFormat, parse_document};

/// Reads a catalog document (`{collections: [...], individuals: [...]}`)
/// from a JSON or YAML file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the catalog file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> ApplicationResult<EndpointCatalog> {
        let source_name = self.path.display().to_string();
        let format = DocumentFormat::from_path(&self.path).ok_or_else(|| {
            ApplicationError::catalog_load(
                &source_name,
                "unsupported file extension (expected .json, .yaml or .yml)",
            )
        })?;

        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ApplicationError::catalog_load(&source_name, e))?;
        let document: CatalogDocument = parse_document(&text, format)
            .map_err(|e| ApplicationError::catalog_load(&source_name, e))?;
        let catalog = EndpointCatalog::try_from(document)?;

        tracing::info!(
            path = %source_name,
            collections = catalog.collections().len(),
            individuals = catalog.individuals().len(),
            "loaded endpoint catalog"
        );
        Ok(catalog)
    }
}

/// A catalog fixed at construction time.
#[derive(Debug, Clone)]
pub struct StaticCatalog(EndpointCatalog);

impl StaticCatalog {
    /// Wraps an already built catalog.
    #[must_use]
    pub const fn new(catalog: EndpointCatalog) -> Self {
        Self(catalog)
    }

    /// The built-in REST API fixture catalog.
    ///
    /// # Errors
    ///
    /// Propagates [`EndpointCatalog::rest_api_defaults`] failures.
    pub fn rest_api_defaults() -> ApplicationResult<Self> {
        Ok(Self::new(EndpointCatalog::rest_api_defaults()?))
    }
}

impl CatalogSource for StaticCatalog {
    async fn load(&self) -> ApplicationResult<EndpointCatalog> {
        Ok(self.0.clone())
    }
}
