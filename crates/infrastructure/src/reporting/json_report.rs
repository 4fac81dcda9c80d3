//! JSON report file.

use std::fs;
use std::path::{Path, PathBuf};

use restprobe_application::ports::ReportSink;
use restprobe_application::{ApplicationError, ApplicationResult};
use restprobe_domain::{CheckOutcome, RunReport};

use crate::serialization::to_json_stable_bytes;

/// Writes the final [`RunReport`] as pretty JSON to a file.
///
/// Per-unit outcomes are ignored; the report already carries them.
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    /// Creates a writer targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonReportWriter {
    fn report(&self, _name: &str, _outcome: &CheckOutcome) {}

    // Called once per run after every fetch has completed, so the blocking
    // write never stalls an in-flight check.
    fn finish(&self, report: &RunReport) -> ApplicationResult<()> {
        let bytes =
            to_json_stable_bytes(report).map_err(|e| ApplicationError::Report(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ApplicationError::Report(format!("{}: {e}", parent.display()))
            })?;
        }
        fs::write(&self.path, bytes)
            .map_err(|e| ApplicationError::Report(format!("{}: {e}", self.path.display())))?;

        tracing::info!(path = %self.path.display(), "wrote JSON report");
        Ok(())
    }
}
