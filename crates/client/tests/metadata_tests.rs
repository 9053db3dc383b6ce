//! Integration tests for metadata fetching and the snapshot cache.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{load_fixture, TEST_KEY};
use pulsar_client::{MetadataParams, PulsarClientBuilder};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn json_response(fixture: &str) -> ResponseTemplate {
    let body: serde_json::Value =
        serde_json::from_str(&load_fixture(fixture)).expect("fixture parses");
    ResponseTemplate::new(200).set_body_json(body)
}

async fn mount_apps(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/apps"))
        .and(header("X-NSONE-Key", TEST_KEY))
        .respond_with(json_response("apps/list_apps.json"))
        .mount(server)
        .await;
}

async fn mount_jobs(server: &MockServer, app_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/apps/{app_id}/jobs")))
        .respond_with(json_response("jobs/list_jobs.json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn snapshot_builds_hierarchy_of_active_entries() {
    let server = MockServer::start().await;
    mount_apps(&server).await;
    mount_jobs(&server, "a1").await;
    mount_jobs(&server, "a2").await;

    let client = common::client_for(&server);
    let snapshot = client
        .metadata(
            TEST_KEY,
            &MetadataParams {
                fetch_jobs: true,
                ..MetadataParams::default()
            },
        )
        .await
        .unwrap();

    // The inactive application a3 and the inactive job j3 are filtered out.
    assert_eq!(snapshot.applications().len(), 2);
    assert_eq!(snapshot.applications()[0].name, "Checkout");
    assert_eq!(snapshot.applications()[0].jobs.len(), 2);
    assert!(snapshot.application("a3").is_none());
    assert!(snapshot.job("j3").is_none());

    let (app, job) = snapshot.job("j2").unwrap();
    assert_eq!(app.app_id, "a1");
    assert_eq!(job.name, "EU probe");
}

#[tokio::test]
async fn inactive_entries_kept_on_request() {
    let server = MockServer::start().await;
    mount_apps(&server).await;
    for app_id in ["a1", "a2", "a3"] {
        mount_jobs(&server, app_id).await;
    }

    let client = common::client_for(&server);
    let snapshot = client
        .metadata(
            TEST_KEY,
            &MetadataParams {
                include_inactive_apps: true,
                fetch_jobs: true,
                include_inactive_jobs: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(snapshot.applications().len(), 3);
    assert!(snapshot.application("a3").is_some());
    assert_eq!(snapshot.applications()[0].jobs.len(), 3);
}

#[tokio::test]
async fn skipping_jobs_leaves_applications_empty() {
    let server = MockServer::start().await;
    mount_apps(&server).await;

    let client = common::client_for(&server);
    let snapshot = client
        .metadata(TEST_KEY, &MetadataParams::default())
        .await
        .unwrap();

    assert_eq!(snapshot.applications().len(), 2);
    assert!(snapshot.applications().iter().all(|app| app.jobs.is_empty()));
}

#[tokio::test]
async fn failed_job_listing_fails_the_whole_snapshot() {
    let server = MockServer::start().await;
    mount_apps(&server).await;
    mount_jobs(&server, "a1").await;
    Mock::given(method("GET"))
        .and(path("/apps/a2/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client
        .metadata(
            TEST_KEY,
            &MetadataParams {
                fetch_jobs: true,
                ..MetadataParams::default()
            },
        )
        .await
        .unwrap_err();

    assert!(!err.is_auth_error());
    assert!(client.metadata_cache().current().await.is_none());
}

#[tokio::test]
async fn fresh_snapshot_is_served_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(json_response("apps/list_apps.json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let params = MetadataParams::default();
    let first = client.metadata(TEST_KEY, &params).await.unwrap();
    let second = client.metadata(TEST_KEY, &params).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn expired_snapshot_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(json_response("apps/list_apps.json"))
        .expect(2)
        .mount(&server)
        .await;

    let client = PulsarClientBuilder::new()
        .endpoint(common::endpoint_of(&server))
        .metadata_ttl(Duration::ZERO)
        .build()
        .unwrap();

    let params = MetadataParams::default();
    let first = client.metadata(TEST_KEY, &params).await.unwrap();
    let second = client.metadata(TEST_KEY, &params).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(json_response("apps/list_apps.json"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = PulsarClientBuilder::new()
        .endpoint(common::endpoint_of(&server))
        .metadata_ttl(Duration::ZERO)
        .build()
        .unwrap();

    let params = MetadataParams::default();
    let first = client.metadata(TEST_KEY, &params).await.unwrap();
    client.metadata(TEST_KEY, &params).await.unwrap_err();

    let held = client.metadata_cache().current().await.unwrap();
    assert!(Arc::ptr_eq(&first, &held), "stale snapshot survives a failed refresh");
}
