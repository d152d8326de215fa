use crate::common::{in_memory_state, send, test_app, StubCompletion};
use axum::http::StatusCode;

#[tokio::test]
async fn test_list_resources() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/resources", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/api/v1/resources?filter[type]=food", None, None).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "res-003");

    let (status, _) = send(&app, "GET", "/api/v1/resources?filter[type]=spaceship", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_emergency_contacts() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/emergency-contacts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let contacts = body["data"].as_array().unwrap();
    assert_eq!(contacts.len(), 4);
    assert_eq!(contacts[1]["number"], "199");
}
