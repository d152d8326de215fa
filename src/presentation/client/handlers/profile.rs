use crate::application::profiles::get::{GetProfileUseCase, ProfileResponse};
use crate::application::profiles::save::{SaveProfileRequest, SaveProfileUseCase};
use crate::domain::profiles::ProfileCollection;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

pub type ProfileDocument = JsonApiResponse<JsonApiResource<ProfileResponse>>;

pub fn profile_document(profile: ProfileResponse) -> ProfileDocument {
    let id = profile.email.clone();
    JsonApiResponse::new(JsonApiResource::new("profiles", id, profile))
}

/// The caller's user profile; placeholder values when none was saved
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileDocument),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Client / Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = GetProfileUseCase::new(state.repos.profiles.clone())
        .execute(ProfileCollection::Users, auth_user.email())
        .await?;
    Ok((StatusCode::OK, Json(profile_document(profile))))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = SaveProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ProfileDocument),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Client / Profile"
)]
pub async fn save_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<SaveProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = SaveProfileUseCase::new(state.repos.profiles.clone())
        .execute(
            ProfileCollection::Users,
            auth_user.email(),
            Some(auth_user.uid().to_string()),
            req,
        )
        .await?;
    Ok((StatusCode::OK, Json(profile_document(profile))))
}
