use crate::application::events::create::{CreateEventRequest, CreateEventUseCase};
use crate::domain::events::DisasterEvent;
use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::events::event_resource;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Record a disaster event
#[utoipa::path(
    post,
    path = "/api/v1/admin/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = JsonApiResponse<JsonApiResource<DisasterEvent>>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin / Events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = CreateEventUseCase::new(state.repos.events.clone())
        .execute(req)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(JsonApiResponse::new(event_resource(event))),
    ))
}
