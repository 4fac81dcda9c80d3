//! Run Conformance Use Case
//!
//! Turns the endpoint catalog into reachability and schema-conformance
//! checks, runs them concurrently and reports every outcome.

use std::sync::Arc;
use std::time::Instant;

use restprobe_domain::{
    BaseUrl, CheckFailure, CheckKind, CheckOutcome, CheckResult, Endpoint, EndpointCatalog,
    FetchError, FetchedResource, RunReport, SchemaRegistry, SchemaValidator, ValidationError,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::ApplicationResult;
use crate::ports::{CancellationReceiver, Clock, ReportSink, ResourceFetcher};

/// Use case for running the conformance suite.
///
/// Each endpoint is fetched exactly once; the same response feeds both of
/// its checks. Endpoints run concurrently up to the configured limit, and
/// a failing endpoint never stops its siblings.
///
/// # Example
///
/// ```ignore
/// let use_case = RunConformance::new(Arc::new(fetcher), Arc::new(registry), Arc::new(SystemClock))
///     .with_concurrency(config.concurrency);
/// let report = use_case.run(&catalog, &config.base_url, &sink, cancel).await?;
/// ```
pub struct RunConformance<F: ResourceFetcher> {
    fetcher: Arc<F>,
    registry: Arc<SchemaRegistry>,
    clock: Arc<dyn Clock>,
    concurrency: usize,
}

impl<F: ResourceFetcher + 'static> RunConformance<F> {
    /// Creates the use case with the default concurrency limit.
    pub fn new(fetcher: Arc<F>, registry: Arc<SchemaRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher,
            registry,
            clock,
            concurrency: crate::RunConfig::DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the maximum number of endpoints checked at once (at least 1).
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Runs every check in the catalog and reports the outcomes.
    ///
    /// Outcomes are reported in catalog order (collections, then
    /// individuals; reachability before schema conformance), whatever the
    /// order in which endpoints complete. When `cancel` fires, endpoints
    /// whose fetch has not completed report both checks as aborted.
    ///
    /// # Errors
    ///
    /// Returns an error only if the sink fails in
    /// [`ReportSink::finish`]; check failures are part of the report.
    pub async fn run(
        &self,
        catalog: &EndpointCatalog,
        base_url: &BaseUrl,
        sink: &dyn ReportSink,
        cancel: CancellationReceiver,
    ) -> ApplicationResult<RunReport> {
        let started_at = self.clock.now();
        let start = Instant::now();
        tracing::info!(
            base_url = %base_url,
            endpoints = catalog.len(),
            concurrency = self.concurrency,
            "starting conformance run"
        );

        let endpoints: Vec<Endpoint> = catalog.iter().cloned().collect();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, endpoint) in endpoints.iter().cloned().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let registry = Arc::clone(&self.registry);
            let semaphore = Arc::clone(&semaphore);
            let base_url = base_url.clone();
            let mut cancel = cancel.clone();

            tasks.spawn(async move {
                let fetched = tokio::select! {
                    biased;
                    () = cancel.cancelled() => None,
                    fetched = async {
                        let _permit = semaphore.acquire_owned().await.ok();
                        fetcher.fetch(&base_url, endpoint.path()).await
                    } => Some(fetched),
                };

                let results = match fetched {
                    Some(fetched) => evaluate(&endpoint, fetched, &registry),
                    None => {
                        tracing::debug!(endpoint = %endpoint, "check aborted by cancellation");
                        aborted(&endpoint)
                    }
                };
                (index, results)
            });
        }

        let mut slots: Vec<Option<[CheckResult; 2]>> = vec![None; endpoints.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, results)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(results);
                    }
                }
                Err(e) => tracing::error!(error = %e, "endpoint check task failed"),
            }
        }

        let results: Vec<CheckResult> = slots
            .into_iter()
            .zip(&endpoints)
            .flat_map(|(slot, endpoint)| slot.unwrap_or_else(|| aborted(endpoint)))
            .collect();

        for result in &results {
            if let Some(failure) = result.outcome.failure() {
                tracing::warn!(check = %result.name(), %failure, "check failed");
            }
            sink.report(&result.name(), &result.outcome);
        }

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let report = RunReport::new(base_url.as_str(), started_at, results, duration_ms);
        tracing::info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            duration_ms,
            "conformance run finished"
        );

        sink.finish(&report)?;
        Ok(report)
    }
}

/// Derives both check results of an endpoint from its fetch outcome.
///
/// Reachability passes iff the fetch succeeded. Schema conformance fails
/// with `UnknownType` whenever the endpoint's type has no schema, with
/// `DependencyFailure` when the fetch failed, and otherwise passes iff the
/// body has no violations.
#[must_use]
pub fn evaluate(
    endpoint: &Endpoint,
    fetched: Result<FetchedResource, FetchError>,
    registry: &SchemaRegistry,
) -> [CheckResult; 2] {
    let reachability = match &fetched {
        Ok(_) => CheckOutcome::Pass,
        Err(e) => CheckOutcome::Fail(CheckFailure::Fetch(e.clone())),
    };

    let conformance = match fetched {
        Err(_) if !registry.contains(endpoint.resource_type()) => {
            CheckOutcome::Fail(CheckFailure::Validation(ValidationError::UnknownType {
                resource_type: endpoint.resource_type().clone(),
            }))
        }
        Err(cause) => CheckOutcome::Fail(CheckFailure::DependencyFailure { cause }),
        Ok(resource) => match SchemaValidator::new(registry).validate(
            &resource.body,
            endpoint.resource_type(),
            endpoint.class(),
        ) {
            Ok(()) => CheckOutcome::Pass,
            Err(e) => CheckOutcome::Fail(CheckFailure::Validation(e)),
        },
    };

    [
        CheckResult::new(endpoint.clone(), CheckKind::Reachability, reachability),
        CheckResult::new(endpoint.clone(), CheckKind::SchemaConformance, conformance),
    ]
}

fn aborted(endpoint: &Endpoint) -> [CheckResult; 2] {
    CheckKind::ALL.map(|kind| {
        CheckResult::new(
            endpoint.clone(),
            kind,
            CheckOutcome::Fail(CheckFailure::Aborted),
        )
    })
}
