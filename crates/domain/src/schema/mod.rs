//! Resource schemas and structural validation.

mod document;
mod registry;
mod validator;

pub use document::{Schema, SchemaKind, TypeSet};
pub use registry::SchemaRegistry;
pub use validator::{SchemaValidator, ValidationError, Violation};
