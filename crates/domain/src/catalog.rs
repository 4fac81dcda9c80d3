//! The endpoint catalog.
//!
//! A catalog is two ordered endpoint lists, collections and individuals,
//! fixed once built. Adding an endpoint under test means appending a path
//! to one of the lists; nothing else changes.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, EndpointClass};
use crate::error::DomainResult;
use crate::schema::SchemaRegistry;

/// Immutable, ordered set of endpoints under test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointCatalog {
    collections: Vec<Endpoint>,
    individuals: Vec<Endpoint>,
}

impl EndpointCatalog {
    /// Returns a builder for constructing a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The fixture catalog of the MaxScale REST API test environment.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in paths; the signature mirrors
    /// [`CatalogBuilder::build`].
    pub fn rest_api_defaults() -> DomainResult<Self> {
        Self::builder()
            .collection("/servers/")
            .collection("/sessions/")
            .collection("/services/")
            .collection("/monitors/")
            .collection("/filters/")
            .individual("/servers/server1")
            .individual("/servers/server2")
            .individual("/sessions/1")
            .build()
    }

    /// Collection endpoints in catalog order.
    #[must_use]
    pub fn collections(&self) -> &[Endpoint] {
        &self.collections
    }

    /// Individual-resource endpoints in catalog order.
    #[must_use]
    pub fn individuals(&self) -> &[Endpoint] {
        &self.individuals
    }

    /// Iterates collections first, then individuals.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.collections.iter().chain(self.individuals.iter())
    }

    /// Total number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len() + self.individuals.len()
    }

    /// Returns true if the catalog has no endpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Endpoints whose derived resource type has no registered schema.
    #[must_use]
    pub fn unmapped<'a>(&'a self, registry: &SchemaRegistry) -> Vec<&'a Endpoint> {
        self.iter()
            .filter(|endpoint| !registry.contains(endpoint.resource_type()))
            .collect()
    }

    /// Converts the catalog back into its serializable document form.
    #[must_use]
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            collections: self.collections.iter().map(|e| e.path().to_string()).collect(),
            individuals: self.individuals.iter().map(|e| e.path().to_string()).collect(),
        }
    }
}

/// Builder for [`EndpointCatalog`].
///
/// Paths are validated in [`CatalogBuilder::build`], so the first invalid
/// path is reported there.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<(String, EndpointClass)>,
}

impl CatalogBuilder {
    /// Appends a collection endpoint.
    #[must_use]
    pub fn collection(mut self, path: impl Into<String>) -> Self {
        self.entries.push((path.into(), EndpointClass::Collection));
        self
    }

    /// Appends an individual-resource endpoint.
    #[must_use]
    pub fn individual(mut self, path: impl Into<String>) -> Self {
        self.entries.push((path.into(), EndpointClass::Individual));
        self
    }

    /// Validates every path and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEndpoint` for the first malformed path.
    pub fn build(self) -> DomainResult<EndpointCatalog> {
        let mut catalog = EndpointCatalog::default();
        for (path, class) in self.entries {
            let endpoint = Endpoint::new(path, class)?;
            match class {
                EndpointClass::Collection => catalog.collections.push(endpoint),
                EndpointClass::Individual => catalog.individuals.push(endpoint),
            }
        }
        Ok(catalog)
    }
}

/// On-disk form of a catalog: two lists of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Collection endpoint paths.
    #[serde(default)]
    pub collections: Vec<String>,
    /// Individual-resource endpoint paths.
    #[serde(default)]
    pub individuals: Vec<String>,
}

impl TryFrom<CatalogDocument> for EndpointCatalog {
    type Error = crate::error::DomainError;

    fn try_from(document: CatalogDocument) -> DomainResult<Self> {
        let builder = document
            .collections
            .into_iter()
            .fold(Self::builder(), CatalogBuilder::collection);
        document
            .individuals
            .into_iter()
            .fold(builder, CatalogBuilder::individual)
            .build()
    }
}
