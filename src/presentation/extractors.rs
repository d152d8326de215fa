use crate::domain::auth::{AuthService, Claims};
use crate::infrastructure::state::AppState;
use crate::shared::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Caller authenticated with a session access token
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    pub fn uid(&self) -> &str {
        &self.claims.sub
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = state
            .auth_service
            .validate_token(token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        if !claims.is_access() {
            return Err(AppError::Unauthorized("Invalid token type".to_string()));
        }

        Ok(AuthUser { claims })
    }
}
