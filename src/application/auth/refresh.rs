use crate::application::auth::token_utils::{TokenExpiry, TokenResponse, hash_token, issue_session};
use crate::domain::auth::{AuthService, SessionRepository};
use crate::domain::identity::IdentityProvider;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

pub type RefreshTokenResponse = TokenResponse;

pub struct RefreshTokenUseCase {
    identity: Arc<dyn IdentityProvider>,
    sessions: Arc<dyn SessionRepository>,
    auth_service: Arc<dyn AuthService>,
    expiry: TokenExpiry,
}

impl RefreshTokenUseCase {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        sessions: Arc<dyn SessionRepository>,
        auth_service: Arc<dyn AuthService>,
        expiry: TokenExpiry,
    ) -> Self {
        Self {
            identity,
            sessions,
            auth_service,
            expiry,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, req: RefreshTokenRequest) -> Result<RefreshTokenResponse, AppError> {
        let claims = self
            .auth_service
            .validate_token(&req.refresh_token)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        if !claims.is_refresh() {
            return Err(AppError::Unauthorized("Invalid token type".to_string()));
        }

        let token_hash = hash_token(&req.refresh_token);
        let session = self
            .sessions
            .find_by_hash(&token_hash)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Refresh token not found or expired".to_string()))?;

        // Rotate before talking to the provider so a replayed token cannot
        // race the first use.
        if !self.sessions.delete_by_hash(&token_hash).await? {
            return Err(AppError::Unauthorized(
                "Refresh token not found or expired".to_string(),
            ));
        }

        let refreshed = self
            .identity
            .refresh(&session.provider_refresh_token)
            .await?;

        if refreshed.identity.uid != session.uid {
            tracing::warn!(session_uid = %session.uid, "provider returned a different account");
            return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
        }

        issue_session(
            &refreshed.identity,
            refreshed.refresh_token,
            &self.auth_service,
            &self.sessions,
            self.expiry,
        )
        .await
    }
}
