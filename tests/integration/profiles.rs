use crate::auth::signup;
use crate::common::{in_memory_state, send, test_app, user_token, StubCompletion};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_profile_written_at_signup() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let tokens = signup(&app, "profile@example.com").await;
    let access = tokens["access_token"].as_str().unwrap();

    let (status, body) = send(&app, "GET", "/api/v1/profile", Some(access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "profiles");
    assert_eq!(body["data"]["id"], "profile@example.com");
    let attrs = &body["data"]["attributes"];
    assert_eq!(attrs["full_name"], "Aung Aung");
    assert_eq!(attrs["location"], "Yangon");
    assert_eq!(attrs["gender"], "Male");
}

#[tokio::test]
async fn test_missing_profile_reads_as_placeholder() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/profile", Some(&user_token()), None).await;

    assert_eq!(status, StatusCode::OK);
    let attrs = &body["data"]["attributes"];
    assert_eq!(attrs["email"], "user@example.com");
    assert_eq!(attrs["full_name"], "-");
    assert_eq!(attrs["phone"], "-");
}

#[tokio::test]
async fn test_save_profile_merges_fields() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let token = user_token();

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/profile",
        Some(&token),
        Some(json!({ "full_name": "Ma Hla", "location": "Mandalay" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["full_name"], "Ma Hla");

    let (_, body) = send(
        &app,
        "PUT",
        "/api/v1/profile",
        Some(&token),
        Some(json!({ "phone": "09-765-4321" })),
    )
    .await;
    let attrs = &body["data"]["attributes"];
    assert_eq!(attrs["full_name"], "Ma Hla");
    assert_eq!(attrs["location"], "Mandalay");
    assert_eq!(attrs["phone"], "09-765-4321");
}

#[tokio::test]
async fn test_save_profile_rejects_bad_input() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let token = user_token();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/profile",
        Some(&token),
        Some(json!({ "location": "Atlantis" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PUT", "/api/v1/profile", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_profile_requires_auth() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, _) = send(&app, "GET", "/api/v1/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
