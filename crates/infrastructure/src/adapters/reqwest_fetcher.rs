//! Resource fetcher implementation using reqwest.
//!
//! This adapter implements the `ResourceFetcher` port. It issues exactly
//! one `GET` per call and classifies the outcome into the fetch error
//! taxonomy; it never retries.

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use restprobe_application::ApplicationError;
use restprobe_application::ports::ResourceFetcher;
use restprobe_domain::{BaseUrl, FetchError, FetchedResource};

/// Maximum number of redirects followed before the fetch fails.
const MAX_REDIRECTS: usize = 10;

/// HTTP fetcher backed by `reqwest::Client`.
pub struct ReqwestFetcher {
    client: Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    /// Creates a fetcher whose every request is bounded by `timeout`.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "restprobe/<version>"
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Http` if the client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .user_agent(concat!("restprobe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ApplicationError::Http(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Maps transport errors to `FetchError::Unreachable`.
    fn map_error(error: &reqwest::Error, timeout: Duration) -> FetchError {
        if error.is_timeout() {
            return FetchError::unreachable(format!(
                "request timed out after {}ms",
                timeout.as_millis()
            ));
        }
        if error.is_redirect() {
            return FetchError::unreachable(format!(
                "too many redirects (max {MAX_REDIRECTS})"
            ));
        }
        if error.is_connect() {
            return FetchError::unreachable(format!(
                "connection failed: {}",
                error_chain(error)
            ));
        }
        FetchError::unreachable(error_chain(error))
    }
}

/// Joins an error and its sources into one line.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl ResourceFetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        base_url: &BaseUrl,
        endpoint_path: &str,
    ) -> Result<FetchedResource, FetchError> {
        if !endpoint_path.starts_with('/') {
            return Err(FetchError::unreachable(format!(
                "invalid request URL: path '{endpoint_path}' must start with '/'"
            )));
        }

        let url = base_url.join(endpoint_path);
        let parsed_url = Url::parse(&url)
            .map_err(|e| FetchError::unreachable(format!("invalid request URL '{url}': {e}")))?;

        let start = Instant::now();
        let response = self
            .client
            .get(parsed_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                let error = Self::map_error(&e, self.timeout);
                tracing::debug!(
                    %url,
                    elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                    %error,
                    "fetch failed"
                );
                error
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "endpoint returned error status");
            return Err(FetchError::HttpError {
                status: status.as_u16(),
            });
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout))?;

        let body = serde_json::from_slice(&body_bytes)
            .map_err(|e| FetchError::malformed(format!("body is not valid JSON: {e}")))?;

        tracing::debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            bytes = body_bytes.len(),
            "fetched endpoint"
        );

        Ok(FetchedResource::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let fetcher = ReqwestFetcher::new(Duration::from_secs(5));
        assert!(fetcher.is_ok());
    }

    #[tokio::test]
    async fn test_relative_path_rejected_without_request() {
        let fetcher = ReqwestFetcher::new(Duration::from_secs(5)).unwrap();
        let base = BaseUrl::parse("http://127.0.0.1:1").unwrap();

        let result = fetcher.fetch(&base, "servers/").await;
        let Err(FetchError::Unreachable { reason }) = result else {
            panic!("expected Unreachable, got {result:?}");
        };
        assert!(reason.contains("must start with '/'"));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_error_chain_joins_sources() {
        let outer = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(
            error_chain(&outer),
            "error sending request: Connection refused"
        );
    }
}
