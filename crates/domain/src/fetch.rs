//! Fetch outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A successfully fetched and parsed resource body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedResource {
    /// HTTP status, always in the 2xx range.
    pub status: u16,
    /// Parsed JSON body.
    pub body: serde_json::Value,
}

impl FetchedResource {
    /// Creates a fetched resource.
    #[must_use]
    pub const fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }
}

/// Why fetching an endpoint failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout or an unusable URL.
    #[error("endpoint unreachable: {reason}")]
    Unreachable {
        /// Transport-level description.
        reason: String,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP error: status {status}{}", reason_suffix(*status))]
    HttpError {
        /// The status received.
        status: u16,
    },

    /// The server answered 2xx but the body is not valid JSON.
    #[error("malformed body: {reason}")]
    MalformedBody {
        /// Parser error description.
        reason: String,
    },
}

impl FetchError {
    /// Creates an `Unreachable` error.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    /// Creates a `MalformedBody` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBody {
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status for `HttpError`.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status } => Some(*status),
            _ => None,
        }
    }
}

const fn reason_suffix(status: u16) -> &'static str {
    match status {
        301 => " Moved Permanently",
        302 => " Found",
        304 => " Not Modified",
        400 => " Bad Request",
        401 => " Unauthorized",
        403 => " Forbidden",
        404 => " Not Found",
        405 => " Method Not Allowed",
        408 => " Request Timeout",
        409 => " Conflict",
        429 => " Too Many Requests",
        500 => " Internal Server Error",
        501 => " Not Implemented",
        502 => " Bad Gateway",
        503 => " Service Unavailable",
        504 => " Gateway Timeout",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = FetchError::HttpError { status: 404 };
        assert_eq!(err.to_string(), "HTTP error: status 404 Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_other_display() {
        assert_eq!(
            FetchError::unreachable("connection refused").to_string(),
            "endpoint unreachable: connection refused"
        );
        assert_eq!(FetchError::malformed("eof").status(), None);
    }
}
