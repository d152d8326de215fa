use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::identity::IdentityError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    /// An external service (identity backend, completion endpoint) failed.
    /// The message is the user-facing notice; the cause is only logged.
    #[error("Upstream error: {0}")]
    UpstreamError(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// JSON:API error document
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<JsonApiError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiError {
    pub status: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<JsonApiErrorSource>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiErrorSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (title, detail) = match self {
            AppError::ValidationError(msg) => ("Validation Error", msg),
            AppError::Unauthorized(msg) => ("Unauthorized", msg),
            AppError::Forbidden(msg) => ("Forbidden", msg),
            AppError::NotFound(msg) => ("Not Found", msg),
            AppError::Conflict(msg) => ("Conflict", msg),
            AppError::UpstreamError(msg) => ("Bad Gateway", msg),
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                ("Internal Server Error", "Database error".to_string())
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                ("Internal Server Error", "Internal server error".to_string())
            }
        };

        let body = ErrorResponse {
            errors: vec![JsonApiError {
                status: status.as_u16().to_string(),
                title: title.to_string(),
                detail,
                source: None,
            }],
        };

        (status, Json(body)).into_response()
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailExists => {
                AppError::Conflict("An account with this email already exists".to_string())
            }
            IdentityError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            IdentityError::InvalidRefreshToken => {
                AppError::Unauthorized("Invalid refresh token".to_string())
            }
            IdentityError::UserNotFound(email) => {
                AppError::NotFound(format!("No account found for {}", email))
            }
            IdentityError::Rejected(msg) => AppError::ValidationError(msg),
            IdentityError::Upstream(e) => {
                tracing::error!("Identity provider error: {:?}", e);
                AppError::UpstreamError(
                    "Authentication service is unavailable. Please try again.".to_string(),
                )
            }
        }
    }
}
