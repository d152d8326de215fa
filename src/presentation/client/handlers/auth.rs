use crate::application::auth::login::{LoginRequest, LoginUseCase};
use crate::application::auth::logout::{LogoutRequest, LogoutUseCase};
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use crate::application::auth::signup::{SignupRequest, SignupUseCase};
use crate::domain::auth::AuthService;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{
    AuthTokenDocument, CurrentUserResource, token_document, token_expiry,
};
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

fn auth_service(state: &AppState) -> Arc<dyn AuthService> {
    state.auth_service.clone()
}

/// Create an account, its user profile and a session
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthTokenDocument),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Identity backend unavailable", body = ErrorResponse)
    ),
    tag = "Client / Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = SignupUseCase::new(
        state.identity.clone(),
        state.repos.profiles.clone(),
        state.repos.sessions.clone(),
        auth_service(&state),
        token_expiry(&state),
    );

    let tokens = use_case.execute(req).await?;
    Ok((StatusCode::CREATED, Json(token_document(tokens))))
}

/// Login handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthTokenDocument),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Client / Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = LoginUseCase::new(
        state.identity.clone(),
        state.repos.sessions.clone(),
        auth_service(&state),
        token_expiry(&state),
    );

    let tokens = use_case.execute(req).await?;
    Ok((StatusCode::OK, Json(token_document(tokens))))
}

/// Refresh token handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = AuthTokenDocument),
        (status = 401, description = "Invalid refresh token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Client / Auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RefreshTokenUseCase::new(
        state.identity.clone(),
        state.repos.sessions.clone(),
        auth_service(&state),
        token_expiry(&state),
    );

    let tokens = use_case.execute(req).await?;
    Ok((StatusCode::OK, Json(token_document(tokens))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No such session", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Client / Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<LogoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    LogoutUseCase::new(state.repos.sessions.clone())
        .execute(auth_user.uid(), req)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Who the access token belongs to
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = JsonApiResponse<JsonApiResource<CurrentUserResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Client / Auth"
)]
pub async fn me(auth_user: AuthUser) -> Result<impl IntoResponse, AppError> {
    let uid = auth_user.uid().to_string();
    let resource = JsonApiResource::new("users", uid, CurrentUserResource::from(auth_user));
    Ok((StatusCode::OK, Json(JsonApiResponse::new(resource))))
}
