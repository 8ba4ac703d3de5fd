mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::Value;
use snaplink::api::handlers::health::health;

fn server(state: snaplink::state::AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let ctx = common::create_test_state();
    let server = server(ctx.state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["cache"][0]["name"], "memory");
    assert_eq!(body["checks"]["cache"][0]["status"], "ok");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_health_degraded_when_database_down() {
    let ctx = common::create_test_state();
    ctx.repository.set_ping_failure(true);
    let server = server(ctx.state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "error");
}
