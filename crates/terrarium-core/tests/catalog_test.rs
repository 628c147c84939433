#![allow(clippy::unwrap_used)]
// End-to-end tests for `Catalog` views against a wiremock backend.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use terrarium_core::{BrowserConfig, Catalog, CoreError, LoadPhase, TimeWindow};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Catalog) {
    let server = MockServer::start().await;
    let config = BrowserConfig::new(Url::parse(&server.uri()).unwrap());
    let catalog = Catalog::new(config).unwrap();
    (server, catalog)
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_releases(server: &MockServer, age: &str, names: &[&str], delay: Duration) {
    let releases: Vec<_> = names
        .iter()
        .map(|n| {
            json!({
                "type": "module", "organization": "cie", "name": n, "version": "1.0.0",
                "createdAt": "2024-05-01T10:00:00Z", "links": null
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/releases"))
        .and(query_param("age", age))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "releases": releases }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn names<T: terrarium_core::Facets>(list: &[std::sync::Arc<T>]) -> Vec<String> {
    list.iter().map(|e| e.name().to_owned()).collect()
}

// ── Modules ─────────────────────────────────────────────────────────

#[tokio::test]
async fn module_view_filters_by_text() {
    let (server, catalog) = setup().await;
    mount_json(
        &server,
        "/api/modules",
        json!({ "modules": [
            { "organization": "cie", "name": "vpc", "provider": "aws", "source_url": "" },
            { "organization": "brooklyn", "name": "eks", "provider": "aws", "source_url": "" }
        ]}),
    )
    .await;

    let mut view = catalog.module_view();
    assert!(view.start());
    let state = view.settled().await;
    assert_eq!(state.phase(), LoadPhase::Ready);

    view.set_text("vpc");
    let shown = view.displayed();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].organization, "cie");

    // Text changes stay local.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn module_views_share_one_loader() {
    let (server, catalog) = setup().await;
    mount_json(&server, "/api/modules", json!({ "modules": null })).await;

    let first = catalog.module_view();
    assert!(first.start());
    first.settled().await;

    let second = catalog.module_view();
    assert!(!second.start());
    assert_eq!(second.load_phase(), LoadPhase::Ready);
    assert!(second.displayed().is_empty());
}

#[tokio::test]
async fn module_metadata_maps_not_found() {
    let (server, catalog) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/modules/cie/vpc/aws"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = catalog.module_metadata("cie", "vpc", "aws").await.unwrap_err();
    assert_eq!(
        err,
        CoreError::ModuleNotFound {
            identifier: "cie/vpc/aws".into()
        }
    );
}

// ── Providers ───────────────────────────────────────────────────────

#[tokio::test]
async fn provider_metadata_returns_versions() {
    let (server, catalog) = setup().await;
    mount_json(
        &server,
        "/api/providers/cie/aws",
        json!({ "data": {
            "organization": "cie", "name": "aws",
            "source_repo_url": "https://git.example.com/cie/aws",
            "versions": ["2.0.0", "1.0.0"]
        }}),
    )
    .await;

    let meta = catalog.provider_metadata("cie", "aws").await.unwrap();
    assert_eq!(meta.entry.address(), "cie/aws");
    assert_eq!(meta.versions, vec!["2.0.0", "1.0.0"]);
}

// ── Releases ────────────────────────────────────────────────────────

#[tokio::test]
async fn releases_are_shown_newest_first() {
    let (server, catalog) = setup().await;
    mount_releases(&server, "24h", &["oldest", "middle", "newest"], Duration::ZERO).await;

    let view = catalog.release_view(None);
    assert_eq!(view.time_window(), Some(TimeWindow::Day));
    assert!(view.start());
    view.settled().await;

    assert_eq!(names(&view.displayed()), vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn window_change_refetches_with_new_age() {
    let (server, catalog) = setup().await;
    mount_releases(&server, "24h", &["day"], Duration::ZERO).await;
    mount_releases(&server, "730h", &["month-a", "month-b"], Duration::ZERO).await;

    let mut view = catalog.release_view(Some(TimeWindow::Day));
    view.start();
    view.settled().await;
    view.set_text("month-b");
    assert!(view.displayed().is_empty());

    assert!(view.set_time_window(TimeWindow::Month).unwrap());
    assert!(view.in_flight());
    view.settled().await;

    assert_eq!(view.text(), "month-b");
    assert_eq!(names(&view.displayed()), vec!["month-b"]);
}

#[tokio::test]
async fn slow_superseded_window_never_lands() {
    let (server, catalog) = setup().await;
    mount_releases(&server, "24h", &["day"], Duration::from_millis(300)).await;
    mount_releases(&server, "168h", &["week"], Duration::ZERO).await;

    let mut view = catalog.release_view(Some(TimeWindow::Day));
    view.start();
    assert!(view.set_time_window(TimeWindow::Week).unwrap());

    view.settled().await;
    assert_eq!(names(&view.displayed()), vec!["week"]);

    // Give the slow 24h reply time to arrive and be discarded.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(names(&view.displayed()), vec!["week"]);
    assert_eq!(view.time_window().map(TimeWindow::token), Some("168h"));
    assert!(!view.in_flight());
}

#[tokio::test]
async fn release_views_on_different_windows_fetch_their_own_lists() {
    let (server, catalog) = setup().await;
    mount_releases(&server, "24h", &["day"], Duration::ZERO).await;
    mount_releases(&server, "168h", &["week"], Duration::ZERO).await;

    let day = catalog.release_view(Some(TimeWindow::Day));
    assert!(day.start());
    day.settled().await;

    let week = catalog.release_view(Some(TimeWindow::Week));
    assert!(week.start());
    week.settled().await;

    assert_eq!(names(&week.displayed()), vec!["week"]);
    assert_eq!(names(&day.displayed()), vec!["day"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn organizations_load_without_touching_release_types() {
    let (server, catalog) = setup().await;
    mount_json(&server, "/api/release/organizations", json!({ "releaseOrgs": ["cie"] })).await;

    let orgs = catalog.load_organizations().await;
    assert_eq!(orgs.phase(), LoadPhase::Ready);
    assert_eq!(orgs.base().len(), 1);
    assert_eq!(catalog.release_types().generation(), 0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/release/organizations");
}

#[tokio::test]
async fn release_failure_keeps_facet_lists() {
    let (server, catalog) = setup().await;
    mount_json(&server, "/api/release/organizations", json!({ "releaseOrgs": ["cie", "acme"] }))
        .await;
    mount_json(&server, "/api/release/types", json!(["module", "bundle"])).await;
    Mock::given(method("GET"))
        .and(path("/api/releases"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    catalog.load_release_facets().await;
    let view = catalog.release_view(None);
    view.start();
    let state = view.settled().await;

    assert_eq!(state.phase(), LoadPhase::Error);
    assert!(matches!(
        state.last_error(),
        Some(CoreError::Api {
            status: Some(500),
            ..
        })
    ));
    assert_eq!(catalog.organizations().base().len(), 2);
    assert_eq!(catalog.release_types().base().len(), 2);
    assert_eq!(catalog.organizations().phase(), LoadPhase::Ready);
}

#[tokio::test]
async fn null_organizations_are_an_empty_list() {
    let (server, catalog) = setup().await;
    mount_json(&server, "/api/release/organizations", json!({ "releaseOrgs": null })).await;
    mount_json(&server, "/api/release/types", json!(null)).await;

    catalog.load_release_facets().await;

    let orgs = catalog.organizations();
    assert!(orgs.base().is_empty());
    assert_eq!(orgs.phase(), LoadPhase::Ready);
    assert!(orgs.last_error().is_none());
    assert!(catalog.release_types().base().is_empty());
}

#[tokio::test]
async fn one_failing_facet_list_leaves_the_other() {
    let (server, catalog) = setup().await;
    mount_json(&server, "/api/release/organizations", json!(["cie"])).await;
    Mock::given(method("GET"))
        .and(path("/api/release/types"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    catalog.load_release_facets().await;

    assert_eq!(catalog.organizations().phase(), LoadPhase::Ready);
    assert_eq!(catalog.release_types().phase(), LoadPhase::Error);
}
