//! Integration tests for the HTTP progress source using wiremock

use core::time::Duration;
use pollbar_lib::poller::{HttpProgressSource, ProgressReport, ProgressSource};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/progress"))
        .respond_with(response)
        .mount(&mock_server)
        .await;
    mock_server
}

fn source_for(mock_server: &MockServer) -> HttpProgressSource {
    HttpProgressSource::new(&format!("{}/progress", mock_server.uri()), TIMEOUT).expect("Failed to create source")
}

#[tokio::test]
async fn test_fetch_integer_progress() {
    let mock_server = serve(ResponseTemplate::new(200).set_body_json(json!({ "progress": 42 }))).await;

    let report = source_for(&mock_server).fetch().await.expect("fetch should succeed");

    assert_eq!(report, ProgressReport::new(42.0));
    assert_eq!(report.label(), "42% completed");
}

#[tokio::test]
async fn test_fetch_fractional_progress() {
    let mock_server = serve(ResponseTemplate::new(200).set_body_json(json!({ "progress": 99.5 }))).await;

    let report = source_for(&mock_server).fetch().await.expect("fetch should succeed");

    assert_eq!(report.label(), "99.5% completed");
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_fetch_issues_plain_get() {
    let mock_server = serve(ResponseTemplate::new(200).set_body_json(json!({ "progress": 0 }))).await;

    let _ = source_for(&mock_server).fetch().await.expect("fetch should succeed");

    let requests = mock_server.received_requests().await.expect("request recording is enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_missing_progress_field_is_an_error() {
    let mock_server = serve(ResponseTemplate::new(200).set_body_json(json!({ "status": "running" }))).await;

    assert!(source_for(&mock_server).fetch().await.is_err());
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    let mock_server = serve(ResponseTemplate::new(200).set_body_string("<html>busy</html>")).await;

    assert!(source_for(&mock_server).fetch().await.is_err());
}

#[tokio::test]
async fn test_server_error_is_an_error() {
    let mock_server = serve(ResponseTemplate::new(500).set_body_json(json!({ "progress": 10 }))).await;

    let err = source_for(&mock_server).fetch().await.expect_err("500 should fail");
    assert!(err.to_string().contains("500"), "unexpected error: {err}");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = serve(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "progress": 10 }))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let source = HttpProgressSource::new(&format!("{}/progress", mock_server.uri()), Duration::from_millis(100)).expect("Failed to create source");

    assert!(source.fetch().await.is_err());
}

#[tokio::test]
async fn test_connection_refused_is_an_error() {
    let mock_server = MockServer::start().await;
    let url = format!("{}/progress", mock_server.uri());
    drop(mock_server);

    let source = HttpProgressSource::new(&url, TIMEOUT).expect("Failed to create source");

    assert!(source.fetch().await.is_err());
}
