use crate::application::admin::roles::{
    AssignRoleUseCase, RoleAssignmentRequest, RoleAssignmentResponse,
};
use crate::domain::auth::Role;
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::JsonApiResponse;
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

async fn assign(
    state: AppState,
    req: RoleAssignmentRequest,
    role: Role,
) -> Result<impl IntoResponse, AppError> {
    let outcome = AssignRoleUseCase::new(state.identity.clone(), state.repos.sessions.clone())
        .execute(req, role)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(outcome))))
}

/// Set the `admin: true` custom claim on the account with this email
#[utoipa::path(
    post,
    path = "/api/v1/admin/roles/set-admin",
    request_body = RoleAssignmentRequest,
    responses(
        (status = 200, description = "Admin role set", body = JsonApiResponse<RoleAssignmentResponse>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No account for this email", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin / Roles"
)]
pub async fn set_admin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RoleAssignmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    assign(state, req, Role::Admin).await
}

/// Set `admin: false` and end that account's sessions
#[utoipa::path(
    post,
    path = "/api/v1/admin/roles/remove-admin",
    request_body = RoleAssignmentRequest,
    responses(
        (status = 200, description = "Admin role removed", body = JsonApiResponse<RoleAssignmentResponse>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No account for this email", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin / Roles"
)]
pub async fn remove_admin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RoleAssignmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    assign(state, req, Role::User).await
}
