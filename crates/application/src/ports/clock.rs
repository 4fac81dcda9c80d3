//! Clock port

use chrono::{DateTime, Utc};

/// Source of the wall-clock time stamped on run reports.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
