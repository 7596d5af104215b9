//! Integration tests for the Kuberhealthy reporter and readiness waiter.

use http_check::report::{
    KuberhealthyReporter, KuberhealthyWaiter, Report, Reporter, SinkError, Waiter,
    RUN_UUID_HEADER,
};
use reqwest::Url;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reporting_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/check", server.uri())).unwrap()
}

#[tokio::test]
async fn test_report_success_posts_ok() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/check"))
        .and(header(RUN_UUID_HEADER, "run-1234"))
        .and(body_json(Report {
            ok: true,
            errors: vec![],
        }))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reporter = KuberhealthyReporter::new(reporting_url(&mock_server), "run-1234").unwrap();
    reporter.report_success().await.unwrap();
}

#[tokio::test]
async fn test_report_failure_posts_errors() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/check"))
        .and(body_json(serde_json::json!({
            "OK": false,
            "Errors": ["checks failed 3 out of 3 attempts"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reporter = KuberhealthyReporter::new(reporting_url(&mock_server), "run-1").unwrap();
    reporter
        .report_failure(vec!["checks failed 3 out of 3 attempts".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_report_is_sink_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unknown run uuid"))
        .mount(&mock_server)
        .await;

    let reporter = KuberhealthyReporter::new(reporting_url(&mock_server), "stale").unwrap();
    let err = reporter.report_success().await.unwrap_err();

    match err {
        SinkError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "unknown run uuid");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_sink_is_request_error() {
    let reporter =
        KuberhealthyReporter::new(Url::parse("http://127.0.0.1:1/check").unwrap(), "x").unwrap();
    let err = reporter.report_success().await.unwrap_err();
    assert!(matches!(err, SinkError::Request(_)));
}

#[tokio::test]
async fn test_waiter_ready_on_any_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&mock_server)
        .await;

    let waiter = KuberhealthyWaiter::new(reporting_url(&mock_server));
    waiter.wait_ready(Duration::from_secs(5)).await.unwrap();
}
