//! Restprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod reporting;
pub mod serialization;

pub use adapters::{ReqwestFetcher, SystemClock};
pub use persistence::{FileCatalogSource, FileSchemaSource, StaticCatalog};
pub use reporting::{CollectingReporter, ConsoleReporter, Fanout, JsonReportWriter};
pub use serialization::{
    DocumentFormat, SerializationError, parse_document, to_json_stable, to_json_stable_bytes,
};
