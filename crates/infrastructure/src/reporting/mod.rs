//! Report sinks.
//!
//! Every sink receives the same stream of named outcomes in catalog order
//! and a final [`RunReport`](restprobe_domain::RunReport).

mod collecting;
mod console;
mod fanout;
mod json_report;

pub use collecting::CollectingReporter;
pub use console::ConsoleReporter;
pub use fanout::Fanout;
pub use json_report::JsonReportWriter;
