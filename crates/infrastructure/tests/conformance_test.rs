//! End-to-end conformance runs against a mock REST API.
//!
//! | Endpoint | Fixture | Expected |
//! |----------|---------|----------|
//! | `/servers/` | valid array | both checks pass |
//! | `/servers/server1` | object missing `id` | schema check fails |
//! | `/sessions/1` | 404 | reachability fails, schema check is a dependency failure |
//! | `/filters/` | HTML body | malformed body |
//! | `/widgets/` | valid array, no schema | unknown type |

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use restprobe_application::{CancellationReceiver, CatalogSource, RunConformance, SchemaSource};
use restprobe_domain::{
    BaseUrl, CheckFailure, CheckKind, CheckOutcome, EndpointCatalog, FetchError, ResourceType,
    Schema, SchemaKind, SchemaRegistry, ValidationError,
};
use restprobe_infrastructure::{
    CollectingReporter, FileCatalogSource, FileSchemaSource, ReqwestFetcher, SystemClock,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn id_schema() -> Schema {
    Schema::object()
        .with_required("id")
        .with_property("id", Schema::of_kind(SchemaKind::String))
}

fn registry() -> SchemaRegistry {
    let server = id_schema()
        .with_required("type")
        .with_property("type", Schema::of_kind(SchemaKind::String).with_enum(vec![json!("servers")]));

    [
        ("server", server),
        ("session", id_schema()),
        ("service", id_schema()),
        ("monitor", id_schema()),
        ("filter", id_schema()),
    ]
    .into_iter()
    .map(|(name, schema)| (ResourceType::new(name), schema))
    .collect()
}

fn base_url(server: &MockServer) -> BaseUrl {
    BaseUrl::parse(&format!("{}/v1", server.uri())).unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1{route}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn run(
    catalog: &EndpointCatalog,
    base: &BaseUrl,
    registry: SchemaRegistry,
    fetcher: ReqwestFetcher,
) -> (restprobe_domain::RunReport, CollectingReporter) {
    let sink = CollectingReporter::new();
    let use_case = RunConformance::new(
        Arc::new(fetcher),
        Arc::new(registry),
        Arc::new(SystemClock::new()),
    )
    .with_concurrency(4);
    let report = use_case
        .run(catalog, base, &sink, CancellationReceiver::never())
        .await
        .unwrap();
    (report, sink)
}

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn valid_collection_passes_both_checks() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/servers/",
        json!([{"id": "server1", "type": "servers"}, {"id": "server2", "type": "servers"}]),
    )
    .await;

    let catalog = EndpointCatalog::builder().collection("/servers/").build().unwrap();
    let (report, sink) = run(&catalog, &base_url(&server), registry(), fetcher()).await;

    assert!(report.all_passed());
    assert_eq!(
        sink.entries(),
        vec![
            ("/servers/: resource should be found".to_string(), CheckOutcome::Pass),
            ("/servers/: resource schema should be valid".to_string(), CheckOutcome::Pass),
        ]
    );
    assert_eq!(sink.final_report().unwrap().total, 2);
}

#[tokio::test]
async fn missing_required_field_fails_schema_check_only() {
    let server = MockServer::start().await;
    mount_json(&server, "/servers/server1", json!({"type": "servers"})).await;

    let catalog = EndpointCatalog::builder()
        .individual("/servers/server1")
        .build()
        .unwrap();
    let (report, _) = run(&catalog, &base_url(&server), registry(), fetcher()).await;

    assert!(report.results[0].passed());
    let Some(CheckFailure::Validation(ValidationError::SchemaViolation { violations })) =
        report.results[1].outcome.failure()
    else {
        panic!("expected schema violation, got {:?}", report.results[1].outcome);
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].to_string(), "missing required field 'id'");
}

#[tokio::test]
async fn not_found_fails_both_checks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/sessions/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let catalog = EndpointCatalog::builder().individual("/sessions/1").build().unwrap();
    let (report, _) = run(&catalog, &base_url(&server), registry(), fetcher()).await;

    assert_eq!(report.failed, 2);
    assert_eq!(
        report.results[0].outcome,
        CheckOutcome::Fail(CheckFailure::Fetch(FetchError::HttpError { status: 404 }))
    );
    assert_eq!(
        report.results[1].outcome,
        CheckOutcome::Fail(CheckFailure::DependencyFailure {
            cause: FetchError::HttpError { status: 404 }
        })
    );
}

#[tokio::test]
async fn html_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/filters/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>maintenance</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let catalog = EndpointCatalog::builder().collection("/filters/").build().unwrap();
    let (report, _) = run(&catalog, &base_url(&server), registry(), fetcher()).await;

    let Some(CheckFailure::Fetch(FetchError::MalformedBody { reason })) =
        report.results[0].outcome.failure()
    else {
        panic!("expected malformed body, got {:?}", report.results[0].outcome);
    };
    assert!(reason.starts_with("body is not valid JSON"), "{reason}");
    assert!(matches!(
        report.results[1].outcome.failure(),
        Some(CheckFailure::DependencyFailure {
            cause: FetchError::MalformedBody { .. }
        })
    ));
}

#[tokio::test]
async fn unknown_resource_type_is_configuration_error() {
    let server = MockServer::start().await;
    mount_json(&server, "/widgets/", json!([{"id": "w1"}])).await;

    let catalog = EndpointCatalog::builder().collection("/widgets/").build().unwrap();
    assert_eq!(catalog.unmapped(&registry()).len(), 1);

    let (report, _) = run(&catalog, &base_url(&server), registry(), fetcher()).await;

    assert!(report.results[0].passed());
    assert_eq!(
        report.results[1].outcome,
        CheckOutcome::Fail(CheckFailure::Validation(ValidationError::UnknownType {
            resource_type: ResourceType::new("widget"),
        }))
    );
    assert_eq!(report.configuration_errors(), 1);
}

#[tokio::test]
async fn default_catalog_reports_in_catalog_order() {
    let server = MockServer::start().await;
    for route in ["/servers/", "/sessions/", "/services/", "/monitors/", "/filters/"] {
        mount_json(&server, route, json!([])).await;
    }
    mount_json(&server, "/servers/server1", json!({"id": "server1", "type": "servers"})).await;
    mount_json(&server, "/servers/server2", json!({"id": "server2", "type": "servers"})).await;

    let catalog = EndpointCatalog::rest_api_defaults().unwrap();
    let (report, sink) = run(&catalog, &base_url(&server), registry(), fetcher()).await;

    assert_eq!(report.total, 16);
    assert_eq!(report.failed, 2, "only /sessions/1 is missing");

    let names = sink.names();
    assert_eq!(names.len(), 16);
    assert_eq!(names[0], "/servers/: resource should be found");
    assert_eq!(names[1], "/servers/: resource schema should be valid");
    assert_eq!(names[10], "/servers/server1: resource should be found");
    assert_eq!(names[15], "/sessions/1: resource schema should be valid");

    let failing: Vec<_> = report.failures().map(|r| r.name()).collect();
    assert_eq!(
        failing,
        vec![
            "/sessions/1: resource should be found",
            "/sessions/1: resource schema should be valid",
        ]
    );
}

#[tokio::test]
async fn each_endpoint_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "rw"}])))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = EndpointCatalog::builder().collection("/services/").build().unwrap();
    let (report, _) = run(&catalog, &base_url(&server), registry(), fetcher()).await;

    assert!(report.all_passed());
    server.verify().await;
}

#[tokio::test]
async fn slow_endpoint_times_out_without_blocking_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/monitors/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_json(&server, "/services/", json!([])).await;

    let catalog = EndpointCatalog::builder()
        .collection("/monitors/")
        .collection("/services/")
        .build()
        .unwrap();
    let fetcher = ReqwestFetcher::new(Duration::from_millis(200)).unwrap();
    let (report, _) = run(&catalog, &base_url(&server), registry(), fetcher).await;

    let Some(CheckFailure::Fetch(FetchError::Unreachable { reason })) =
        report.results[0].outcome.failure()
    else {
        panic!("expected timeout, got {:?}", report.results[0].outcome);
    };
    assert!(reason.contains("timed out"), "{reason}");
    assert!(report.results[2].passed());
    assert!(report.results[3].passed());
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    let base = BaseUrl::parse("http://127.0.0.1:1/v1").unwrap();
    let catalog = EndpointCatalog::builder().collection("/servers/").build().unwrap();

    let (report, _) = run(&catalog, &base, registry(), fetcher()).await;

    assert!(matches!(
        report.results[0].outcome.failure(),
        Some(CheckFailure::Fetch(FetchError::Unreachable { .. }))
    ));
    assert_eq!(report.results[1].kind, CheckKind::SchemaConformance);
    assert!(matches!(
        report.results[1].outcome.failure(),
        Some(CheckFailure::DependencyFailure { .. })
    ));
}

#[tokio::test]
async fn file_sources_drive_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas");
    std::fs::create_dir(&schemas).unwrap();
    std::fs::write(
        schemas.join("service.yaml"),
        "type: object\nrequired: [id, state]\nproperties:\n  state:\n    type: string\n    enum: [Started, Stopped]\n",
    )
    .unwrap();
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"{"collections": ["/services/"], "individuals": ["/services/rw"]}"#,
    )
    .unwrap();

    let server = MockServer::start().await;
    mount_json(&server, "/services/", json!([{"id": "rw", "state": "Started"}])).await;
    mount_json(&server, "/services/rw", json!({"id": "rw", "state": "Broken"})).await;

    let registry = FileSchemaSource::new(&schemas).load().await.unwrap();
    let catalog = FileCatalogSource::new(&catalog_path).load().await.unwrap();
    let (report, _) = run(&catalog, &base_url(&server), registry, fetcher()).await;

    assert_eq!(report.passed, 3);
    let Some(CheckFailure::Validation(ValidationError::SchemaViolation { violations })) =
        report.results[3].outcome.failure()
    else {
        panic!("expected schema violation, got {:?}", report.results[3].outcome);
    };
    assert_eq!(violations[0].path, "/state");
}
