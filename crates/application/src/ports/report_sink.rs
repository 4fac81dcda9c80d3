//! Test report sink port

use restprobe_domain::{CheckOutcome, RunReport};

use crate::ApplicationResult;

/// Receives one named outcome per reportable unit.
pub trait ReportSink: Send + Sync {
    /// Reports a single (endpoint, check kind) outcome.
    fn report(&self, name: &str, outcome: &CheckOutcome);

    /// Called once after every unit has been reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot persist its output.
    fn finish(&self, _report: &RunReport) -> ApplicationResult<()> {
        Ok(())
    }
}

impl<T: ReportSink + ?Sized> ReportSink for &T {
    fn report(&self, name: &str, outcome: &CheckOutcome) {
        (**self).report(name, outcome);
    }

    fn finish(&self, report: &RunReport) -> ApplicationResult<()> {
        (**self).finish(report)
    }
}
