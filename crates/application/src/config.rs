//! Run configuration.

use std::time::Duration;

use restprobe_domain::BaseUrl;

use crate::{ApplicationError, ApplicationResult};

/// Settings for one conformance run, fixed before the first check starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Prefix joined with every endpoint path.
    pub base_url: BaseUrl,
    /// Upper bound on a single fetch.
    pub request_timeout: Duration,
    /// Maximum number of endpoints checked at once.
    pub concurrency: usize,
    /// Optional bound on the whole run; unfinished checks are aborted.
    pub run_timeout: Option<Duration>,
}

impl RunConfig {
    /// Base URL of the fixture REST API.
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8989/v1";
    /// Default per-request timeout.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default number of concurrent endpoint checks.
    pub const DEFAULT_CONCURRENCY: usize = 8;

    /// Creates a configuration with default limits.
    #[must_use]
    pub const fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            concurrency: Self::DEFAULT_CONCURRENCY,
            run_timeout: None,
        }
    }

    /// Parses the base URL and creates a configuration with default limits.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if the URL is invalid.
    pub fn from_base_url(raw: &str) -> ApplicationResult<Self> {
        Ok(Self::new(BaseUrl::parse(raw)?))
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the concurrency limit.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the whole-run timeout.
    #[must_use]
    pub fn with_run_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Checks the limits.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for a zero timeout or a
    /// zero concurrency limit.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.request_timeout.is_zero() {
            return Err(ApplicationError::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(ApplicationError::Configuration(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.run_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApplicationError::Configuration(
                "run timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_base_url(RunConfig::DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.concurrency, 8);
        assert!(config.run_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = RunConfig::from_base_url("not a url");
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = RunConfig::from_base_url("http://localhost:8989").unwrap();
        assert!(config.clone().with_concurrency(0).validate().is_err());
        assert!(config.clone().with_request_timeout(Duration::ZERO).validate().is_err());
        assert!(config.with_run_timeout(Some(Duration::ZERO)).validate().is_err());
    }
}
