//! Restprobe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (fetcher, schema and catalog sources, report sink, clock)
//! - The conformance run use case
//! - Run configuration and application-level error handling

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use config::RunConfig;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    CancellationReceiver, CancellationToken, CatalogSource, Clock, ReportSink, ResourceFetcher,
    SchemaSource,
};
pub use use_cases::{RunConformance, evaluate};
