//! Schema registry keyed by resource type.

use std::collections::BTreeMap;

use super::document::Schema;
use crate::error::DomainResult;
use crate::resource_type::ResourceType;

/// Read-only mapping from resource type to schema, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    schemas: BTreeMap<ResourceType, Schema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a schema without checking it.
    pub fn insert(&mut self, resource_type: ResourceType, schema: Schema) {
        self.schemas.insert(resource_type, schema);
    }

    /// Checks and inserts a schema.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchema` if [`Schema::check`] fails.
    pub fn register(&mut self, resource_type: ResourceType, schema: Schema) -> DomainResult<()> {
        schema.check(resource_type.as_str())?;
        self.insert(resource_type, schema);
        Ok(())
    }

    /// Looks up the schema for a resource type.
    #[must_use]
    pub fn lookup(&self, resource_type: &ResourceType) -> Option<&Schema> {
        self.schemas.get(resource_type)
    }

    /// Returns true if the type has a schema.
    #[must_use]
    pub fn contains(&self, resource_type: &ResourceType) -> bool {
        self.schemas.contains_key(resource_type)
    }

    /// Registered resource types in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &ResourceType> {
        self.schemas.keys()
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schema is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl FromIterator<(ResourceType, Schema)> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = (ResourceType, Schema)>>(iter: I) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
        }
    }
}
