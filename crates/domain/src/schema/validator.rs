//! Structural validation of response bodies.
//!
//! Validation never stops at the first defect: every violation in the
//! document is collected so one run reports all of them.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::document::{Schema, SchemaKind};
use super::registry::SchemaRegistry;
use crate::endpoint::EndpointClass;
use crate::resource_type::ResourceType;

/// A single structural defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON pointer to the offending value; empty for the document root.
    pub path: String,
    /// What is wrong at that location.
    pub message: String,
}

impl Violation {
    /// Creates a violation.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Why a body failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// No schema is registered for the resource type.
    #[error("no schema registered for resource type '{resource_type}'")]
    UnknownType {
        /// The type that was looked up.
        resource_type: ResourceType,
    },

    /// The body violates its schema.
    #[error("{} schema violation(s): {}", violations.len(), join_violations(violations))]
    SchemaViolation {
        /// Every defect found, in document order.
        violations: Vec<Violation>,
    },
}

impl ValidationError {
    /// Returns true for registry misconfiguration rather than a server defect.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }

    /// Returns the violations, empty for `UnknownType`.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::UnknownType { .. } => &[],
            Self::SchemaViolation { violations } => violations,
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    let parts: Vec<_> = violations.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

/// Validates JSON values against the schemas in a registry.
///
/// Validation is a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator over the given registry.
    #[must_use]
    pub const fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validates `json` as the body of an endpoint of class `class` whose
    /// resources are of `expected_type`.
    ///
    /// Collection bodies must be arrays whose every element satisfies the
    /// individual schema; an empty array passes.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if the registry has no schema for the type,
    /// or `SchemaViolation` listing every defect found.
    pub fn validate(
        &self,
        json: &Value,
        expected_type: &ResourceType,
        class: EndpointClass,
    ) -> Result<(), ValidationError> {
        let schema = self
            .registry
            .lookup(expected_type)
            .ok_or_else(|| ValidationError::UnknownType {
                resource_type: expected_type.clone(),
            })?;

        let mut violations = Vec::new();
        match class {
            EndpointClass::Individual => check_value(schema, json, "", &mut violations),
            EndpointClass::Collection => match json {
                Value::Array(elements) => {
                    for (index, element) in elements.iter().enumerate() {
                        check_value(schema, element, &format!("/{index}"), &mut violations);
                    }
                }
                other => violations.push(Violation::new(
                    "",
                    format!(
                        "expected an array of '{expected_type}' resources, found {}",
                        SchemaKind::of(other)
                    ),
                )),
            },
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::SchemaViolation { violations })
        }
    }
}

fn check_value(schema: &Schema, value: &Value, path: &str, out: &mut Vec<Violation>) {
    if let Some(kind) = &schema.kind {
        if !kind.accepts(value) {
            out.push(Violation::new(
                path,
                format!("expected {kind}, found {}", SchemaKind::of(value)),
            ));
            return;
        }
    }

    if let Some(allowed) = &schema.allowed {
        if !allowed.contains(value) {
            out.push(Violation::new(
                path,
                format!("value {value} is not one of the allowed values"),
            ));
        }
    }

    match value {
        Value::String(text) => check_pattern(schema, text, path, out),
        Value::Object(fields) => {
            for name in &schema.required {
                if !fields.contains_key(name) {
                    out.push(Violation::new(
                        path,
                        format!("missing required field '{name}'"),
                    ));
                }
            }
            for (name, property) in &schema.properties {
                if let Some(field) = fields.get(name) {
                    check_value(property, field, &child_path(path, name), out);
                }
            }
        }
        Value::Array(elements) => {
            if let Some(items) = &schema.items {
                for (index, element) in elements.iter().enumerate() {
                    check_value(items, element, &format!("{path}/{index}"), out);
                }
            }
        }
        _ => {}
    }
}

fn check_pattern(schema: &Schema, text: &str, path: &str, out: &mut Vec<Violation>) {
    let Some(pattern) = &schema.pattern else {
        return;
    };
    match Regex::new(pattern) {
        Ok(regex) if regex.is_match(text) => {}
        Ok(_) => out.push(Violation::new(
            path,
            format!("'{text}' does not match pattern '{pattern}'"),
        )),
        Err(e) => out.push(Violation::new(
            path,
            format!("invalid pattern '{pattern}': {e}"),
        )),
    }
}

/// Appends an object key to a JSON pointer, escaping `~` and `/`.
fn child_path(parent: &str, key: &str) -> String {
    let escaped = key.replace('~', "~0").replace('/', "~1");
    format!("{parent}/{escaped}")
}
