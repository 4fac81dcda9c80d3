//! Tee into several sinks.

use restprobe_application::ApplicationResult;
use restprobe_application::ports::ReportSink;
use restprobe_domain::{CheckOutcome, RunReport};

/// Forwards every call to each inner sink in order.
#[derive(Default)]
pub struct Fanout {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Fanout {
    /// Creates an empty fanout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink.
    #[must_use]
    pub fn with(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Number of inner sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns true if there are no inner sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ReportSink for Fanout {
    fn report(&self, name: &str, outcome: &CheckOutcome) {
        for sink in &self.sinks {
            sink.report(name, outcome);
        }
    }

    /// Finishes every sink, even after one fails, and returns the first error.
    fn finish(&self, report: &RunReport) -> ApplicationResult<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.finish(report) {
                tracing::error!(error = %e, "report sink failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
