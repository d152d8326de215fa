use crate::application::profiles::get::{GetProfileUseCase, ProfileResponse};
use crate::application::profiles::list::ListProfilesUseCase;
use crate::application::profiles::save::{SaveProfileRequest, SaveProfileUseCase};
use crate::domain::profiles::ProfileCollection;
use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::profile::{ProfileDocument, profile_document};
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::pagination::{PageParams, PaginationLinkBuilder};
use crate::shared::query::Qs;
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use serde::Deserialize;

/// The calling admin's profile (admins collection, keyed by email)
#[utoipa::path(
    get,
    path = "/api/v1/admin/profile",
    responses(
        (status = 200, description = "Admin profile", body = ProfileDocument),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin / Profiles"
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = GetProfileUseCase::new(state.repos.profiles.clone())
        .execute(ProfileCollection::Admins, auth_user.email())
        .await?;
    Ok((StatusCode::OK, Json(profile_document(profile))))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/profile",
    request_body = SaveProfileRequest,
    responses(
        (status = 200, description = "Admin profile saved", body = ProfileDocument),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin / Profiles"
)]
pub async fn save_own_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<SaveProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = SaveProfileUseCase::new(state.repos.profiles.clone())
        .execute(ProfileCollection::Admins, auth_user.email(), None, req)
        .await?;
    Ok((StatusCode::OK, Json(profile_document(profile))))
}

/// Any admin's profile by email
#[utoipa::path(
    get,
    path = "/api/v1/admin/profiles/{email}",
    params(("email" = String, Path, description = "Admin email")),
    responses(
        (status = 200, description = "Admin profile", body = ProfileDocument),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin / Profiles"
)]
pub async fn get_admin_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = GetProfileUseCase::new(state.repos.profiles.clone())
        .execute(ProfileCollection::Admins, &email)
        .await?;
    Ok((StatusCode::OK, Json(profile_document(profile))))
}

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub page: PageParams,
}

/// Registered user profiles, newest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, from 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, 1 to 100")
    ),
    responses(
        (status = 200, description = "User profiles", body = JsonApiResponse<Vec<JsonApiResource<ProfileResponse>>>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin / Profiles"
)]
pub async fn list_users(
    State(state): State<AppState>,
    uri: Uri,
    Qs(query): Qs<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (profiles, total) = ListProfilesUseCase::new(state.repos.profiles.clone())
        .execute(ProfileCollection::Users, &query.page)
        .await?;

    let page = query.page.normalized();
    let resources: Vec<_> = profiles
        .into_iter()
        .map(|p| {
            let id = p.email.clone();
            JsonApiResource::new("profiles", id, p)
        })
        .collect();
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
