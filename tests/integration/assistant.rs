use crate::common::{in_memory_state, send, test_app, StubCompletion};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

#[tokio::test]
async fn test_disaster_info_answer() {
    let stub = StubCompletion::returning(json!({ "answer": "Move to higher ground." }));
    let app = test_app(in_memory_state(stub.clone()));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/assistant/disaster-info",
        None,
        Some(json!({ "query": "What should I do in a flood?", "photoDataUri": PNG_DATA_URI })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["answer"], "Move to higher ground.");

    let prompts = stub.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].text.contains("What should I do in a flood?"));
    assert_eq!(prompts[0].media.len(), 1);
    assert_eq!(prompts[0].media[0].mime_type, "image/png");
}

#[tokio::test]
async fn test_disaster_info_upstream_failure() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/assistant/disaster-info",
        None,
        Some(json!({ "query": "What should I do in a flood?" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["errors"][0]["detail"],
        "Failed to get disaster information. Please try again."
    );
}

#[tokio::test]
async fn test_query_too_short() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/assistant/earthquake-info",
        None,
        Some(json!({ "query": "eq?" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_rejects_unsupported_photo_type() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/assistant/severity",
        None,
        Some(json!({
            "description": "Water is rising quickly in the street",
            "photoDataUri": "data:application/pdf;base64,JVBERi0="
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"][0]["detail"].as_str().unwrap().contains(".png"));
}

#[tokio::test]
async fn test_safety_tips() {
    let stub = StubCompletion::returning(json!({ "safetyRecommendations": "- Stay indoors" }));
    let app = test_app(in_memory_state(stub));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/assistant/safety-tips",
        None,
        Some(json!({
            "location": "Mandalay",
            "recentDisasterEvents": "M5.5 earthquake near Mandalay yesterday"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["safetyRecommendations"], "- Stay indoors");
}

#[tokio::test]
async fn test_chat_failure_apologises() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/assistant/chat",
        None,
        Some(json!({ "message": "Is the bridge safe?" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userMessage"]["sender"], "user");
    assert_eq!(body["data"]["userMessage"]["text"], "Is the bridge safe?");
    assert_eq!(body["data"]["reply"]["sender"], "ai");
    assert_eq!(
        body["data"]["reply"]["text"],
        "Sorry, I couldn't process your request right now."
    );
}

#[tokio::test]
async fn test_locate_resources_uses_catalog() {
    let stub = StubCompletion::returning(json!({
        "foundResources": [{ "id": "res-002" }, { "id": "made-up" }, { "id": "res-002" }]
    }));
    let app = test_app(in_memory_state(stub.clone()));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/assistant/resources",
        None,
        Some(json!({ "query": "hospital", "location": "Yangon" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let found = body["data"]["foundResources"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "General Hospital - ER");
    assert_eq!(found[0]["type"], "medical");
    assert!(stub.prompts.lock().unwrap()[0].text.contains("res-003"));
}

fn multipart_body(boundary: &str, description: &str, photo: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\n{d}\r\n",
        b = boundary,
        d = description
    )
    .into_bytes();
    if let Some((mime, bytes)) = photo {
        body.extend(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"p\"\r\nContent-Type: {m}\r\n\r\n",
                b = boundary,
                m = mime
            )
            .into_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend(format!("--{}--\r\n", boundary).into_bytes());
    body
}

async fn upload(stub: std::sync::Arc<StubCompletion>, body: Vec<u8>) -> (StatusCode, Value) {
    let app = test_app(in_memory_state(stub));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/assistant/severity/upload")
                .method("POST")
                .header("content-type", "multipart/form-data; boundary=XBOUNDARY")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_severity_upload() {
    let stub = StubCompletion::returning(json!({
        "severityAssessment": "Moderate",
        "potentialHazards": ["Falling debris"],
        "recommendedActions": ["Keep clear of the building"]
    }));
    let body = multipart_body(
        "XBOUNDARY",
        "Cracked wall after the tremor",
        Some(("image/jpeg", b"\xff\xd8\xff\xe0fakejpeg")),
    );

    let (status, json) = upload(stub.clone(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["severityAssessment"], "Moderate");
    assert_eq!(json["data"]["potentialHazards"][0], "Falling debris");

    let prompts = stub.prompts.lock().unwrap();
    assert_eq!(prompts[0].media[0].mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_severity_upload_validation() {
    let body = multipart_body("XBOUNDARY", "short", None);
    let (status, _) = upload(StubCompletion::failing(), body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let body = multipart_body(
        "XBOUNDARY",
        "Cracked wall after the tremor",
        Some(("text/plain", b"hello")),
    );
    let (status, _) = upload(StubCompletion::failing(), body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
