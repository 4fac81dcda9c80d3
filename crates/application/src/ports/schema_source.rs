//! Schema source port

use std::future::Future;

use restprobe_domain::SchemaRegistry;

use crate::ApplicationResult;

/// Port for loading the schema registry before a run.
pub trait SchemaSource: Send + Sync {
    /// Loads every schema document into a registry.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::SchemaLoad` if a document cannot be read
    /// or parsed, or fails its structural check.
    fn load(&self) -> impl Future<Output = ApplicationResult<SchemaRegistry>> + Send;
}
