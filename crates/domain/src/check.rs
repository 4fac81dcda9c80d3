//! Check results.
//!
//! Every endpoint yields exactly two reportable units per run: a
//! reachability check followed by a schema-conformance check.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::endpoint::Endpoint;
use crate::fetch::FetchError;
use crate::schema::ValidationError;

/// The two kinds of check run against every endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// The endpoint answers 2xx with a JSON body.
    Reachability,
    /// The body satisfies the schema for the endpoint's resource type.
    SchemaConformance,
}

impl CheckKind {
    /// Both kinds, in reporting order.
    pub const ALL: [Self; 2] = [Self::Reachability, Self::SchemaConformance];

    /// Human-readable suffix used in report names.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Reachability => "resource should be found",
            Self::SchemaConformance => "resource schema should be valid",
        }
    }
}

/// Why a check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CheckFailure {
    /// The fetch itself failed.
    #[error("{0}")]
    Fetch(FetchError),

    /// The body failed schema validation, or its type is unknown.
    #[error("{0}")]
    Validation(ValidationError),

    /// Schema validation was not attempted because the fetch failed.
    #[error("dependency: endpoint unreachable ({cause})")]
    DependencyFailure {
        /// The fetch failure that blocked validation.
        cause: FetchError,
    },

    /// The run was cancelled before the check completed.
    #[error("aborted: run cancelled before the check completed")]
    Aborted,
}

impl CheckFailure {
    /// Returns true if the failure stems from harness configuration
    /// rather than the service under test.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Validation(e) if e.is_configuration_error())
    }
}

/// Pass or fail with diagnostic detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "failure", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The check passed.
    Pass,
    /// The check failed.
    Fail(CheckFailure),
}

impl CheckOutcome {
    /// Returns true for `Pass`.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&CheckFailure> {
        match self {
            Self::Pass => None,
            Self::Fail(failure) => Some(failure),
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("ok"),
            Self::Fail(failure) => write!(f, "FAILED: {failure}"),
        }
    }
}

/// Outcome of one (endpoint, check kind) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// The endpoint checked.
    pub endpoint: Endpoint,
    /// Which check this is.
    pub kind: CheckKind,
    /// Pass or fail.
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// Creates a check result.
    #[must_use]
    pub const fn new(endpoint: Endpoint, kind: CheckKind, outcome: CheckOutcome) -> Self {
        Self {
            endpoint,
            kind,
            outcome,
        }
    }

    /// Name under which this unit is reported, e.g.
    /// `/servers/: resource should be found`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}: {}", self.endpoint.path(), self.kind.description())
    }

    /// Returns true if the check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_type::ResourceType;

    #[test]
    fn test_names() {
        let endpoint = Endpoint::collection("/servers/").unwrap();
        let found = CheckResult::new(endpoint.clone(), CheckKind::Reachability, CheckOutcome::Pass);
        let valid = CheckResult::new(endpoint, CheckKind::SchemaConformance, CheckOutcome::Pass);

        assert_eq!(found.name(), "/servers/: resource should be found");
        assert_eq!(valid.name(), "/servers/: resource schema should be valid");
    }

    #[test]
    fn test_dependency_failure_display() {
        let failure = CheckFailure::DependencyFailure {
            cause: FetchError::HttpError { status: 404 },
        };
        assert_eq!(
            failure.to_string(),
            "dependency: endpoint unreachable (HTTP error: status 404 Not Found)"
        );
    }

    #[test]
    fn test_configuration_error() {
        let unknown = CheckFailure::Validation(ValidationError::UnknownType {
            resource_type: ResourceType::new("widget"),
        });
        assert!(unknown.is_configuration_error());
        assert!(!CheckFailure::Aborted.is_configuration_error());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(CheckOutcome::Pass.to_string(), "ok");
        assert_eq!(
            CheckOutcome::Fail(CheckFailure::Aborted).to_string(),
            "FAILED: aborted: run cancelled before the check completed"
        );
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let outcome = CheckOutcome::Fail(CheckFailure::Fetch(FetchError::HttpError { status: 500 }));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["failure"]["reason"], "fetch");
        assert_eq!(json["failure"]["kind"], "http_error");
    }
}
