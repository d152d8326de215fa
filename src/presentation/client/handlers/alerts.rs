use crate::application::alerts::matching::{MatchingAlertsQuery, MatchingAlertsUseCase};
use crate::application::alerts::preferences::{
    AlertPreferencesResponse, GetAlertPreferencesUseCase, SaveAlertPreferencesRequest,
    SaveAlertPreferencesUseCase,
};
use crate::domain::events::DisasterEvent;
use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::events::event_resource;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::query::Qs;
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/api/v1/alerts/preferences",
    responses(
        (status = 200, description = "Saved preferences, or the defaults", body = JsonApiResponse<AlertPreferencesResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Client / Alerts"
)]
pub async fn get_preferences(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let prefs = GetAlertPreferencesUseCase::new(state.repos.alerts.clone())
        .execute(auth_user.uid())
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(prefs))))
}

#[utoipa::path(
    put,
    path = "/api/v1/alerts/preferences",
    request_body = SaveAlertPreferencesRequest,
    responses(
        (status = 200, description = "Preferences saved", body = JsonApiResponse<AlertPreferencesResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Client / Alerts"
)]
pub async fn save_preferences(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<SaveAlertPreferencesRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prefs = SaveAlertPreferencesUseCase::new(state.repos.alerts.clone())
        .execute(auth_user.uid(), req)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(prefs))))
}

/// Recent events the caller's preferences alert on
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    params(MatchingAlertsQuery),
    responses(
        (status = 200, description = "Matching events", body = JsonApiResponse<Vec<JsonApiResource<DisasterEvent>>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Client / Alerts"
)]
pub async fn matching_alerts(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Qs(query): Qs<MatchingAlertsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events: Vec<_> =
        MatchingAlertsUseCase::new(state.repos.alerts.clone(), state.repos.events.clone())
            .execute(auth_user.uid(), &query)
            .await?
            .into_iter()
            .map(event_resource)
            .collect();
    Ok((StatusCode::OK, Json(JsonApiResponse::new(events))))
}
