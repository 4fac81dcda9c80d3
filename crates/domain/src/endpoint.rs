//! Endpoints under test.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::resource_type::ResourceType;

/// The two endpoint classes a catalog distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointClass {
    /// Returns an array of resources of one type.
    Collection,
    /// Returns a single named resource.
    Individual,
}

impl EndpointClass {
    /// Returns a lowercase label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Individual => "individual",
        }
    }
}

/// A relative URL path identifying a resource or resource collection.
///
/// Construction guarantees the path starts with `/` and has a segment
/// from which the resource type can be derived, so [`Endpoint::resource_type`]
/// is total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    path: String,
    class: EndpointClass,
    #[serde(skip)]
    resource_type: ResourceType,
}

impl Endpoint {
    /// Creates a collection endpoint, e.g. `/servers/`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEndpoint` if the path does not start
    /// with `/` or contains no segment.
    pub fn collection(path: impl Into<String>) -> DomainResult<Self> {
        Self::new(path, EndpointClass::Collection)
    }

    /// Creates an individual-resource endpoint, e.g. `/servers/server1`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEndpoint` if the path does not start
    /// with `/` or has no parent segment.
    pub fn individual(path: impl Into<String>) -> DomainResult<Self> {
        Self::new(path, EndpointClass::Individual)
    }

    /// Creates an endpoint of the given class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEndpoint` if the path is malformed.
    pub fn new(path: impl Into<String>, class: EndpointClass) -> DomainResult<Self> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(DomainError::invalid_endpoint(
                path,
                "path must start with '/'",
            ));
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let type_segment = match class {
            EndpointClass::Collection => segments.last(),
            EndpointClass::Individual if segments.len() >= 2 => segments.get(segments.len() - 2),
            EndpointClass::Individual => None,
        };

        let Some(segment) = type_segment else {
            let reason = match class {
                EndpointClass::Collection => "collection path has no resource segment",
                EndpointClass::Individual => "individual path has no parent collection segment",
            };
            return Err(DomainError::invalid_endpoint(path, reason));
        };
        let resource_type = ResourceType::from_segment(segment);

        Ok(Self {
            path,
            class,
            resource_type,
        })
    }

    /// Returns the relative path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the endpoint class.
    #[must_use]
    pub const fn class(&self) -> EndpointClass {
        self.class
    }

    /// Returns the resource type whose schema this endpoint must satisfy.
    #[must_use]
    pub const fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
