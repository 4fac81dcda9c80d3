//! Run-level summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::check::CheckResult;

/// Results of one conformance run, in report order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique identifier of the run.
    pub run_id: Uuid,
    /// Base URL the run targeted.
    pub base_url: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Every check result, two per endpoint.
    pub results: Vec<CheckResult>,
    /// Total number of checks.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Creates a report and computes the totals.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<CheckResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = total - passed;

        Self {
            run_id: Uuid::now_v7(),
            base_url: base_url.into(),
            started_at,
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if all checks passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Failed checks in report order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Number of failures caused by harness configuration.
    #[must_use]
    pub fn configuration_errors(&self) -> usize {
        self.failures()
            .filter(|r| r.outcome.failure().is_some_and(|f| f.is_configuration_error()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckFailure, CheckKind, CheckOutcome};
    use crate::endpoint::Endpoint;

    #[test]
    fn test_totals() {
        let endpoint = Endpoint::collection("/servers/").unwrap();
        let results = vec![
            CheckResult::new(endpoint.clone(), CheckKind::Reachability, CheckOutcome::Pass),
            CheckResult::new(
                endpoint,
                CheckKind::SchemaConformance,
                CheckOutcome::Fail(CheckFailure::Aborted),
            ),
        ];

        let report = RunReport::new("http://localhost:8989", Utc::now(), results, 12);
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert!((report.pass_rate() - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.configuration_errors(), 0);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = RunReport::new("http://localhost", Utc::now(), Vec::new(), 0);
        assert!(report.all_passed());
        assert!((report.pass_rate() - 100.0).abs() < f64::EPSILON);
    }
}
