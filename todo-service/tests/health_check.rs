mod common;

use axum::http::StatusCode;
use common::TestApp;
use todo_service::handlers::health::BACKEND_OK;

#[tokio::test]
async fn backend_test_route_returns_fixed_text() {
    let app = TestApp::spawn();

    let response = app.request("GET", "/test", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, BACKEND_OK);
    assert!(response
        .content_type
        .expect("Missing content-type header")
        .starts_with("text/plain"));
}

#[tokio::test]
async fn backend_test_route_ignores_store_outage() {
    let app = TestApp::disconnected();

    let response = app.request("GET", "/test", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, BACKEND_OK);
}

#[tokio::test]
async fn health_check_reports_store_up() {
    let app = TestApp::spawn();

    let response = app.request("GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "todo-service-test");
    assert_eq!(response.body["store"], "up");
}

#[tokio::test]
async fn health_check_reports_store_down() {
    let app = TestApp::disconnected();

    let response = app.request("GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "unhealthy");
    assert_eq!(response.body["store"], "down");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::spawn();

    let response = app.request("GET", "/test", None).await;

    assert!(response.headers.contains_key("x-request-id"));
}
