//! Resource fetcher port

use std::future::Future;

use restprobe_domain::{BaseUrl, FetchError, FetchedResource};

/// Port for fetching one endpoint of the service under test.
///
/// Implementations issue a single `GET` per call, with no retries, and
/// must bound the request with a timeout.
pub trait ResourceFetcher: Send + Sync {
    /// Fetches `endpoint_path` relative to `base_url` and parses the body
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Unreachable` on transport failure or timeout, `HttpError`
    /// on a non-2xx status and `MalformedBody` when a 2xx body is not JSON.
    fn fetch(
        &self,
        base_url: &BaseUrl,
        endpoint_path: &str,
    ) -> impl Future<Output = Result<FetchedResource, FetchError>> + Send;
}
