use crate::application::events::get::GetEventUseCase;
use crate::application::events::list::{EventFilterParams, EventListQuery, ListEventsUseCase};
use crate::application::events::map_config::{MapConfig, map_config};
use crate::application::events::markers::ListMarkersUseCase;
use crate::domain::events::{DisasterEvent, MapMarker};
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::pagination::PaginationLinkBuilder;
use crate::shared::query::Qs;
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use serde::Deserialize;

pub fn event_resource(event: DisasterEvent) -> JsonApiResource<DisasterEvent> {
    let id = event.id.clone();
    JsonApiResource::new("events", id, event)
}

/// Recent events, newest first
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, from 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, 1 to 100"),
        ("filter[type]" = Option<String>, Query, description = "Event type, case-insensitive"),
        ("filter[minMagnitude]" = Option<f64>, Query, description = "Minimum magnitude, 0 to 10"),
        ("filter[sinceHours]" = Option<i64>, Query, description = "Only events from the last N hours")
    ),
    responses(
        (status = 200, description = "Events", body = JsonApiResponse<Vec<JsonApiResource<DisasterEvent>>>),
        (status = 422, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "Client / Events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    uri: Uri,
    Qs(query): Qs<EventListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (events, total) = ListEventsUseCase::new(state.repos.events.clone())
        .execute(&query)
        .await?;

    let page = query.page.normalized();
    let resources: Vec<_> = events.into_iter().map(event_resource).collect();
    let links = PaginationLinkBuilder::from_uri(&uri, page.number, page.size, total).build();

    Ok((
        StatusCode::OK,
        Json(
            JsonApiResponse::new(resources)
                .with_meta(page.meta(total))
                .with_links(links),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event", body = JsonApiResponse<JsonApiResource<DisasterEvent>>),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "Client / Events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = GetEventUseCase::new(state.repos.events.clone())
        .execute(&id)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(event_resource(event)))))
}

#[derive(Debug, Default, Deserialize)]
pub struct MarkerQuery {
    #[serde(default)]
    pub filter: EventFilterParams,
}

/// Map markers for the filtered events
#[utoipa::path(
    get,
    path = "/api/v1/map/markers",
    params(
        ("filter[type]" = Option<String>, Query, description = "Event type, case-insensitive"),
        ("filter[minMagnitude]" = Option<f64>, Query, description = "Minimum magnitude"),
        ("filter[sinceHours]" = Option<i64>, Query, description = "Only events from the last N hours")
    ),
    responses(
        (status = 200, description = "Markers", body = JsonApiResponse<Vec<MapMarker>>),
        (status = 422, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "Client / Map"
)]
pub async fn list_markers(
    State(state): State<AppState>,
    Qs(query): Qs<MarkerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let markers = ListMarkersUseCase::new(state.repos.events.clone())
        .execute(&query.filter)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(markers))))
}

#[utoipa::path(
    get,
    path = "/api/v1/map/config",
    responses(
        (status = 200, description = "Map tile key and default viewport", body = JsonApiResponse<MapConfig>)
    ),
    tag = "Client / Map"
)]
pub async fn get_map_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(JsonApiResponse::new(map_config(state.maps_api_key.clone())))
}
