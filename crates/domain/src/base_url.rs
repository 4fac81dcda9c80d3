//! Base URL of the service under test.

use std::fmt;

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Absolute URL prefix combined with every endpoint path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the value is not an absolute
    /// `http` or `https` URL.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        let parsed =
            Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {trimmed}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {trimmed}",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(DomainError::InvalidUrl(format!("missing host: {trimmed}")));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(DomainError::InvalidUrl(format!(
                "base URL must not carry a query or fragment: {trimmed}"
            )));
        }

        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }

    /// Joins an endpoint path onto this base.
    ///
    /// The path is appended verbatim, so `http://h/v1` + `/servers/`
    /// yields `http://h/v1/servers/`.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }

    /// Returns the normalized base as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
