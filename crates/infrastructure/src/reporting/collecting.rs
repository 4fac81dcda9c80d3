//! In-memory sink.

use std::sync::{Mutex, PoisonError};

use restprobe_application::ApplicationResult;
use restprobe_application::ports::ReportSink;
use restprobe_domain::{CheckOutcome, RunReport};

/// Records every reported unit and the final report.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    entries: Mutex<Vec<(String, CheckOutcome)>>,
    report: Mutex<Option<RunReport>>,
}

impl CollectingReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported units in the order they arrived.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, CheckOutcome)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the reported units.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }

    /// The report passed to `finish`, if it was called.
    #[must_use]
    pub fn final_report(&self) -> Option<RunReport> {
        self.report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ReportSink for CollectingReporter {
    fn report(&self, name: &str, outcome: &CheckOutcome) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_string(), outcome.clone()));
    }

    fn finish(&self, report: &RunReport) -> ApplicationResult<()> {
        *self.report.lock().unwrap_or_else(PoisonError::into_inner) = Some(report.clone());
        Ok(())
    }
}
