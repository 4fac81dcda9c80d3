//! Restprobe Domain - Core conformance types
//!
//! This crate defines the domain model for the restprobe harness:
//! endpoints and the catalog under test, resource schemas and their
//! validator, and the check results a run produces.
//! All types here are pure Rust with no I/O dependencies.

pub mod base_url;
pub mod catalog;
pub mod check;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod report;
pub mod resource_type;
pub mod schema;

pub use base_url::BaseUrl;
pub use catalog::{CatalogBuilder, CatalogDocument, EndpointCatalog};
pub use check::{CheckFailure, CheckKind, CheckOutcome, CheckResult};
pub use endpoint::{Endpoint, EndpointClass};
pub use error::{DomainError, DomainResult};
pub use fetch::{FetchError, FetchedResource};
pub use report::RunReport;
pub use resource_type::ResourceType;
pub use schema::{
    Schema, SchemaKind, SchemaRegistry, SchemaValidator, TypeSet, ValidationError, Violation,
};
