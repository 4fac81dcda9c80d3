//! Application error types

use thiserror::Error;
use restprobe_domain::DomainError;

/// Application-level errors.
///
/// These abort a run before it starts or while it is being reported.
/// Failures of individual checks are never errors; they are check results.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The run configuration is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Schema documents could not be loaded.
    #[error("failed to load schema '{source_name}': {reason}")]
    SchemaLoad {
        /// File or source the schema came from.
        source_name: String,
        /// What went wrong.
        reason: String,
    },

    /// The endpoint catalog could not be loaded.
    #[error("failed to load catalog '{source_name}': {reason}")]
    CatalogLoad {
        /// File or source the catalog came from.
        source_name: String,
        /// What went wrong.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// A report sink failed to write its output.
    #[error("report error: {0}")]
    Report(String),
}

impl ApplicationError {
    /// Creates a `SchemaLoad` error.
    pub fn schema_load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SchemaLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `CatalogLoad` error.
    pub fn catalog_load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::CatalogLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
