//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod cancellation;
mod catalog_source;
mod clock;
mod fetcher;
mod report_sink;
mod schema_source;

pub use cancellation::{CancellationReceiver, CancellationToken};
pub use catalog_source::CatalogSource;
pub use clock::Clock;
pub use fetcher::ResourceFetcher;
pub use report_sink::ReportSink;
pub use schema_source::SchemaSource;
