use crate::common::{in_memory_state, send, test_app, user_token, StubCompletion};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_default_preferences() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/alerts/preferences", Some(&user_token()), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["notificationsEnabled"], true);
    assert_eq!(body["data"]["location"], "Yangon, Myanmar");
    assert_eq!(body["data"]["magnitudeThreshold"], 4.5);
}

#[tokio::test]
async fn test_matching_alerts_follow_preferences() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let token = user_token();

    let (status, body) = send(&app, "GET", "/api/v1/alerts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "3");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/alerts/preferences",
        Some(&token),
        Some(json!({ "location": "Mandalay", "magnitudeThreshold": 3.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/v1/alerts", Some(&token), None).await;
    assert_eq!(body["data"][0]["id"], "5");

    send(
        &app,
        "PUT",
        "/api/v1/alerts/preferences",
        Some(&token),
        Some(json!({ "notificationsEnabled": false })),
    )
    .await;
    let (_, body) = send(&app, "GET", "/api/v1/alerts", Some(&token), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_alert_window_override() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let token = user_token();
    send(
        &app,
        "PUT",
        "/api/v1/alerts/preferences",
        Some(&token),
        Some(json!({ "location": "Bago", "magnitudeThreshold": 3.0 })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/v1/alerts", Some(&token), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, "GET", "/api/v1/alerts?sinceHours=48", Some(&token), None).await;
    assert_eq!(body["data"][0]["id"], "f1");
}

#[tokio::test]
async fn test_preferences_validation_and_auth() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/alerts/preferences",
        Some(&user_token()),
        Some(json!({ "magnitudeThreshold": 12 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/api/v1/alerts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
