//! Human-readable console output.

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use restprobe_application::ports::ReportSink;
use restprobe_application::{ApplicationError, ApplicationResult};
use restprobe_domain::{CheckOutcome, RunReport};

/// Writes one line per reported unit and a summary on finish.
///
/// ```text
/// /servers/: resource should be found ... ok
/// /sessions/1: resource schema should be valid ... FAILED: missing required field 'id'
///
/// result: FAILED. 15 passed; 1 failed; finished in 42ms
/// ```
pub struct ConsoleReporter<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl ConsoleReporter<Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Creates a reporter writing to `writer`.
    pub const fn with_writer(writer: W) -> Self {
        Self {
            out: Mutex::new(writer),
        }
    }

    /// Consumes the reporter and returns its writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> ReportSink for ConsoleReporter<W> {
    fn report(&self, name: &str, outcome: &CheckOutcome) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{name} ... {outcome}") {
            tracing::warn!(error = %e, "failed to write report line");
        }
    }

    fn finish(&self, report: &RunReport) -> ApplicationResult<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let verdict = if report.all_passed() { "ok" } else { "FAILED" };

        writeln!(out)
            .and_then(|()| {
                writeln!(
                    out,
                    "result: {verdict}. {} passed; {} failed; finished in {}ms",
                    report.passed, report.failed, report.duration_ms
                )
            })
            .and_then(|()| {
                let config_errors = report.configuration_errors();
                if config_errors == 0 {
                    Ok(())
                } else {
                    writeln!(
                        out,
                        "note: {config_errors} failure(s) caused by missing schemas"
                    )
                }
            })
            .and_then(|()| out.flush())
            .map_err(|e| ApplicationError::Report(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use restprobe_domain::{
        CheckFailure, CheckKind, CheckResult, Endpoint, FetchError, ResourceType, ValidationError,
    };

    fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).expect("utf-8")
    }

    #[test]
    fn test_lines_and_summary() {
        let reporter = ConsoleReporter::with_writer(Vec::new());
        let endpoint = Endpoint::individual("/sessions/1").unwrap();
        let failure = CheckOutcome::Fail(CheckFailure::Fetch(FetchError::HttpError { status: 404 }));

        reporter.report("/servers/: resource should be found", &CheckOutcome::Pass);
        reporter.report("/sessions/1: resource should be found", &failure);

        let results = vec![
            CheckResult::new(endpoint.clone(), CheckKind::Reachability, CheckOutcome::Pass),
            CheckResult::new(endpoint, CheckKind::Reachability, failure),
        ];
        let report = RunReport::new("http://127.0.0.1:8989/v1", Utc::now(), results, 7);
        reporter.finish(&report).unwrap();

        let text = output(reporter);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "/servers/: resource should be found ... ok");
        assert_eq!(
            lines[1],
            "/sessions/1: resource should be found ... FAILED: HTTP error: status 404 Not Found"
        );
        assert_eq!(lines[2], "");
        assert_eq!(
            lines[3],
            "result: FAILED. 1 passed; 1 failed; finished in 7ms"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_configuration_note() {
        let reporter = ConsoleReporter::with_writer(Vec::new());
        let endpoint = Endpoint::collection("/widgets/").unwrap();
        let results = vec![CheckResult::new(
            endpoint,
            CheckKind::SchemaConformance,
            CheckOutcome::Fail(CheckFailure::Validation(ValidationError::UnknownType {
                resource_type: ResourceType::new("widget"),
            })),
        )];
        let report = RunReport::new("http://localhost", Utc::now(), results, 1);
        reporter.finish(&report).unwrap();

        let text = output(reporter);
        assert!(text.contains("note: 1 failure(s) caused by missing schemas"), "{text}");
    }
}
