use crate::common::{self, in_memory_state, send, test_app, StubCompletion};
use axum::http::StatusCode;
use disaster_aid::infrastructure::state::Repositories;
use serial_test::serial;

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
#[serial]
async fn test_health_with_database() {
    let pool = setup_test_db_or_skip!();
    let mut state = in_memory_state(StubCompletion::failing());
    state.repos = Repositories::postgres(&pool);
    state.pool = pool;

    let (status, body) = send(&test_app(state), "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/auth/login"].is_object());
}
