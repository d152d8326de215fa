use crate::auth::signup;
use crate::common::{admin_token, in_memory_state, send, test_app, user_token, StubCompletion};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_admin_routes_reject_user_tokens() {
    let app = test_app(in_memory_state(StubCompletion::failing()));

    let (status, body) = send(&app, "GET", "/api/v1/admin/users", Some(&user_token()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errors"][0]["detail"], "Admin role required");

    let (status, _) = send(&app, "GET", "/api/v1/admin/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_set_admin_takes_effect_on_next_login() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    signup(&app, "promote@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/admin/roles/set-admin",
        Some(&admin_token()),
        Some(json!({ "email": "promote@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "promote@example.com", "password": "Str0ng!pass" })),
    )
    .await;
    assert_eq!(body["data"]["attributes"]["role"], "admin");
}

#[tokio::test]
async fn test_remove_admin_ends_sessions() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let tokens = signup(&app, "demote@example.com").await;
    let refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/admin/roles/remove-admin",
        Some(&admin_token()),
        Some(json!({ "email": "demote@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "user");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_set_admin_unknown_account() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/admin/roles/set-admin",
        Some(&admin_token()),
        Some(json!({ "email": "ghost@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_profiles() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let token = admin_token();

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/admin/profile",
        Some(&token),
        Some(json!({ "full_name": "Daw Su", "location": "NayPyiDaw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "admin@example.com");

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/admin/profiles/admin@example.com",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["full_name"], "Daw Su");

    // Admin documents are separate from user documents
    let (_, body) = send(&app, "GET", "/api/v1/admin/profile", Some(&token), None).await;
    assert_eq!(body["data"]["attributes"]["location"], "NayPyiDaw");
}

#[tokio::test]
async fn test_list_users_paginates() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    for n in 0..3 {
        signup(&app, &format!("user{}@example.com", n)).await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/admin/users?page[number]=1&page[size]=2",
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 3);
    assert!(body["links"]["next"].as_str().is_some());
}

#[tokio::test]
async fn test_create_event() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/admin/events",
        Some(&admin_token()),
        Some(json!({
            "type": "flood",
            "magnitude": 4.2,
            "place": "Bago, Myanmar",
            "latitude": 17.33,
            "longitude": 96.48
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "events");
    assert_eq!(body["data"]["attributes"]["depth"], 0.0);

    let id = body["data"]["id"].as_str().unwrap();
    let (status, _) = send(&app, "GET", &format!("/api/v1/events/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/admin/events",
        Some(&admin_token()),
        Some(json!({ "type": "flood", "magnitude": 42.0, "place": "x", "latitude": 0.0, "longitude": 0.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
