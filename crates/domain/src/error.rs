//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while constructing catalog or schema values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided base URL is invalid or not absolute.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// An endpoint path is malformed or has no resource segment.
    #[error("invalid endpoint '{path}': {reason}")]
    InvalidEndpoint {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A schema document is structurally unusable.
    #[error("invalid schema for '{resource_type}': {reason}")]
    InvalidSchema {
        /// Resource type the schema was registered under.
        resource_type: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl DomainError {
    /// Creates an `InvalidEndpoint` error.
    pub fn invalid_endpoint(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidSchema` error.
    pub fn invalid_schema(resource_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            resource_type: resource_type.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
