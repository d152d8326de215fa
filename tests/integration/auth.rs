use crate::common::{in_memory_state, send, test_app, StubCompletion};
use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

fn app() -> Router {
    test_app(in_memory_state(StubCompletion::failing()))
}

pub fn signup_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "Str0ng!pass",
        "confirm_password": "Str0ng!pass",
        "full_name": "Aung Aung",
        "phone": "09-123-4567",
        "gender": "Male",
        "date_of_birth": "1990-05-17",
        "location": "Yangon",
        "agree_to_terms": true
    })
}

pub async fn signup(app: &Router, email: &str) -> Value {
    let (status, body) = send(app, "POST", "/api/v1/auth/signup", None, Some(signup_body(email))).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    body["data"]["attributes"].clone()
}

#[tokio::test]
async fn test_signup_returns_token_document() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(signup_body("aung@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "auth-tokens");
    let attrs = &body["data"]["attributes"];
    assert_eq!(attrs["email"], "aung@example.com");
    assert_eq!(attrs["role"], "user");
    assert_eq!(attrs["token_type"], "Bearer");
    assert!(attrs["access_token"].as_str().is_some());
    assert_eq!(body["data"]["id"], attrs["uid"]);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = app();
    signup(&app, "dup@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(signup_body("dup@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let app = app();
    let mut body = signup_body("someone@example.com");
    body["confirm_password"] = json!("Other!pass1");
    body["agree_to_terms"] = json!(false);

    let (status, body) = send(&app, "POST", "/api/v1/auth/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["errors"][0]["detail"].as_str().unwrap();
    assert!(detail.contains("agree_to_terms"));
    assert!(detail.contains("confirm_password: Passwords do not match"));
}

#[tokio::test]
async fn test_login_and_me() {
    let app = app();
    signup(&app, "login@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "login@example.com", "password": "Str0ng!pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["data"]["attributes"]["access_token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/v1/auth/me", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "users");
    assert_eq!(body["data"]["attributes"]["email"], "login@example.com");
    assert_eq!(body["data"]["attributes"]["role"], "user");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = app();
    signup(&app, "wrong@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "wrong@example.com", "password": "Nope!pass1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_access_token() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/v1/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A refresh token is not accepted as a bearer token
    let tokens = signup(&app, "kind@example.com").await;
    let refresh = tokens["refresh_token"].as_str().unwrap();
    let (status, _) = send(&app, "GET", "/api/v1/auth/me", Some(refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_session() {
    let app = app();
    let tokens = signup(&app, "rotate@example.com").await;
    let first = tokens["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refresh_token": first })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let second = body["data"]["attributes"]["refresh_token"].as_str().unwrap();
    assert_ne!(second, first);

    // The old token was consumed by the rotation
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refresh_token": first })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = app();
    let tokens = signup(&app, "bye@example.com").await;
    let access = tokens["access_token"].as_str().unwrap().to_string();
    let refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/logout",
        Some(&access),
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

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
