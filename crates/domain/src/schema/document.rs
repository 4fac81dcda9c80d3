//! Schema documents.
//!
//! The supported vocabulary is the structural subset of JSON Schema:
//! `type`, `required`, `properties`, `items`, `pattern` and `enum`.
//! Unknown keywords (`$schema`, `title`, `description`, ...) are ignored.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// JSON value kinds a schema may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// Number without a fractional part.
    Integer,
    /// Any JSON number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
}

impl SchemaKind {
    /// Returns the kind of a JSON value, reporting whole numbers as `Integer`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }

    /// Returns true if `value` is of this kind.
    ///
    /// `Number` accepts integers too.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Object, Value::Object(_))
            | (Self::Array, Value::Array(_))
            | (Self::String, Value::String(_))
            | (Self::Number, Value::Number(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Null, Value::Null) => true,
            (Self::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            _ => false,
        }
    }

    /// Returns the JSON Schema keyword for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `type` keyword: one kind or a list of accepted kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    /// A single kind.
    One(SchemaKind),
    /// Any of several kinds, e.g. `["string", "null"]`.
    Many(Vec<SchemaKind>),
}

impl TypeSet {
    /// Returns true if any listed kind matches the value.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::One(kind) => kind.matches(value),
            Self::Many(kinds) => kinds.iter().any(|kind| kind.matches(value)),
        }
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(kind) => write!(f, "{kind}"),
            Self::Many(kinds) => {
                let names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
                write!(f, "one of [{}]", names.join(", "))
            }
        }
    }
}

/// A structural contract a JSON value must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Accepted value kinds. Absent means any kind.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeSet>,

    /// Fields that must be present on an object.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Schemas for object fields, checked when the field is present.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    /// Schema every array element must satisfy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// Regex a string value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Closed set of allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,
}

impl Schema {
    /// Creates a schema that only constrains the value kind.
    #[must_use]
    pub fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind: Some(TypeSet::One(kind)),
            ..Self::default()
        }
    }

    /// Creates an object schema.
    #[must_use]
    pub fn object() -> Self {
        Self::of_kind(SchemaKind::Object)
    }

    /// Adds a required field (builder pattern).
    #[must_use]
    pub fn with_required(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    /// Adds a property schema (builder pattern).
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Self) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Sets the array item schema (builder pattern).
    #[must_use]
    pub fn with_items(mut self, items: Self) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Sets the string pattern (builder pattern).
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the allowed values (builder pattern).
    #[must_use]
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.allowed = Some(values);
        self
    }

    /// Checks that the document is usable for validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchema` if any nested `pattern` fails to
    /// compile or the `enum` list is empty.
    pub fn check(&self, resource_type: &str) -> DomainResult<()> {
        if let Some(pattern) = &self.pattern {
            Regex::new(pattern).map_err(|e| {
                DomainError::invalid_schema(resource_type, format!("bad pattern '{pattern}': {e}"))
            })?;
        }
        if self.allowed.as_ref().is_some_and(Vec::is_empty) {
            return Err(DomainError::invalid_schema(
                resource_type,
                "enum must list at least one value",
            ));
        }
        for property in self.properties.values() {
            property.check(resource_type)?;
        }
        if let Some(items) = &self.items {
            items.check(resource_type)?;
        }
        Ok(())
    }
}
