//! # restprobe CLI entry point
//!
//! Loads schemas and the endpoint catalog, runs the conformance suite
//! against a live REST API and maps the outcome to an exit code:
//! `0` when every check passed, `1` when any check failed against the
//! service and `2` when the run could not start, its report could not be
//! written or a resource type had no schema.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use restprobe_application::{
    ApplicationResult, CancellationToken, CatalogSource, RunConfig, RunConformance, SchemaSource,
};
use restprobe_domain::{EndpointCatalog, RunReport};
use restprobe_infrastructure::{
    ConsoleReporter, Fanout, FileCatalogSource, FileSchemaSource, JsonReportWriter,
    ReqwestFetcher, StaticCatalog, SystemClock,
};

/// Checks that every endpoint of a REST API is reachable and returns JSON
/// that conforms to the schema of its resource type.
#[derive(Parser, Debug)]
#[command(name = "restprobe", version, about, long_about = None)]
struct Cli {
    /// Base URL joined with every endpoint path.
    #[arg(long, env = "RESTPROBE_BASE_URL", default_value = RunConfig::DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory of `<type>.json` / `<type>.yaml` schema documents.
    #[arg(long, env = "RESTPROBE_SCHEMAS", default_value = "schemas")]
    schemas: PathBuf,

    /// Catalog file listing collection and individual endpoints.
    /// Defaults to the built-in REST API fixture catalog.
    #[arg(long, env = "RESTPROBE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "RESTPROBE_TIMEOUT_MS", default_value_t = 30_000)]
    timeout_ms: u64,

    /// Maximum number of endpoints checked at once.
    #[arg(long, env = "RESTPROBE_CONCURRENCY", default_value_t = RunConfig::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Abort checks still running after this many seconds.
    #[arg(long, env = "RESTPROBE_RUN_TIMEOUT_SECS")]
    run_timeout_secs: Option<u64>,

    /// Also write the run report as JSON to this file.
    #[arg(long, env = "RESTPROBE_REPORT")]
    report: Option<PathBuf>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn run_config(&self) -> ApplicationResult<RunConfig> {
        let config = RunConfig::from_base_url(&self.base_url)?
            .with_request_timeout(Duration::from_millis(self.timeout_ms))
            .with_concurrency(self.concurrency)
            .with_run_timeout(self.run_timeout_secs.map(Duration::from_secs));
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_catalog(path: Option<&Path>) -> ApplicationResult<EndpointCatalog> {
    match path {
        Some(path) => FileCatalogSource::new(path).load().await,
        None => StaticCatalog::rest_api_defaults()?.load().await,
    }
}

async fn run(cli: Cli) -> ApplicationResult<RunReport> {
    let config = cli.run_config()?;
    let registry = FileSchemaSource::new(&cli.schemas).load().await?;
    let catalog = load_catalog(cli.catalog.as_deref()).await?;

    for endpoint in catalog.unmapped(&registry) {
        tracing::error!(
            endpoint = %endpoint,
            class = endpoint.class().label(),
            resource_type = %endpoint.resource_type(),
            "no schema registered for resource type"
        );
    }

    let fetcher = ReqwestFetcher::new(config.request_timeout)?;
    let use_case = RunConformance::new(
        Arc::new(fetcher),
        Arc::new(registry),
        Arc::new(SystemClock::new()),
    )
    .with_concurrency(config.concurrency);

    let mut sink = Fanout::new().with(ConsoleReporter::stdout());
    if let Some(path) = &cli.report {
        sink = sink.with(JsonReportWriter::new(path));
    }

    let (token, cancel) = CancellationToken::new();
    let deadline = config.run_timeout.map(|timeout| {
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "run timeout reached, aborting remaining checks"
            );
            token.cancel();
        })
    });

    let result = use_case
        .run(&catalog, &config.base_url, &sink, cancel)
        .await;

    if let Some(deadline) = deadline {
        deadline.abort();
    }
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "restprobe starting");

    let result = run(cli).await;
    if let Err(e) = &result {
        tracing::error!("{e}");
        eprintln!("error: {e}");
    }
    exit_code(&result)
}

/// Maps a run outcome to the process exit code.
///
/// A check failing because a resource type has no schema is a harness
/// configuration error and exits like a load error.
fn exit_code(result: &ApplicationResult<RunReport>) -> ExitCode {
    match result {
        Ok(report) if report.all_passed() => ExitCode::SUCCESS,
        Ok(report) if report.configuration_errors() > 0 => ExitCode::from(2),
        Ok(_) => ExitCode::from(1),
        Err(_) => ExitCode::from(2),
    }
}
