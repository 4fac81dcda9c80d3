//! Catalog source port

use std::future::Future;

use restprobe_domain::EndpointCatalog;

use crate::ApplicationResult;

/// Port for obtaining the endpoint catalog before a run.
pub trait CatalogSource: Send + Sync {
    /// Loads the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::CatalogLoad` if the catalog cannot be read,
    /// or `ApplicationError::Domain` if it lists an invalid path.
    fn load(&self) -> impl Future<Output = ApplicationResult<EndpointCatalog>> + Send;
}
