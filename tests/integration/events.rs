use crate::common::{in_memory_state, send, test_app, StubCompletion};
use axum::http::StatusCode;

#[tokio::test]
async fn test_list_events_newest_first() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/events", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data[0]["type"], "events");
    assert_eq!(data[0]["id"], "1");
    assert_eq!(body["meta"]["total"], 4);
}

#[tokio::test]
async fn test_list_events_filters_and_pages() {
    let app = test_app(in_memory_state(StubCompletion::failing()));

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/events?filter[type]=EARTHQUAKE&filter[minMagnitude]=5",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);

    let (_, body) = send(
        &app,
        "GET",
        "/api/v1/events?page[number]=2&page[size]=3",
        None,
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert!(body["links"]["prev"].as_str().is_some());

    let (_, body) = send(&app, "GET", "/api/v1/events?filter[sinceHours]=10", None, None).await;
    assert_eq!(body["meta"]["total"], 2);
}

#[tokio::test]
async fn test_list_events_rejects_bad_filter() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, _) = send(&app, "GET", "/api/v1/events?filter[minMagnitude]=11", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_event() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/events/3", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["place"], "Near Yangon, Myanmar");

    let (status, _) = send(&app, "GET", "/api/v1/events/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_markers() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/map/markers?filter[type]=earthquake", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let markers = body["data"].as_array().unwrap();
    assert_eq!(markers.len(), 3);
    let strong = markers.iter().find(|m| m["id"] == "3").unwrap();
    assert_eq!(strong["position"]["lat"], 16.8409);
    assert!(strong["color"].as_str().is_some());
    assert_eq!(strong["label"], "6.1");
    assert!(strong["title"].as_str().unwrap().starts_with("M 6.1"));
}

#[tokio::test]
async fn test_map_config() {
    let app = test_app(in_memory_state(StubCompletion::failing()));
    let (status, body) = send(&app, "GET", "/api/v1/map/config", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["apiKey"], "maps-test-key");
    assert_eq!(body["data"]["zoom"], 5);
}
