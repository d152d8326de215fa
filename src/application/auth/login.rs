use crate::application::auth::token_utils::{TokenExpiry, TokenResponse, issue_session};
use crate::domain::auth::{AuthService, SessionRepository};
use crate::domain::identity::IdentityProvider;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub type LoginResponse = TokenResponse;

pub struct LoginUseCase {
    identity: Arc<dyn IdentityProvider>,
    sessions: Arc<dyn SessionRepository>,
    auth_service: Arc<dyn AuthService>,
    expiry: TokenExpiry,
}

impl LoginUseCase {
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

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let signed_in = self.identity.sign_in(&req.email, &req.password).await?;

        issue_session(
            &signed_in.identity,
            signed_in.refresh_token,
            &self.auth_service,
            &self.sessions,
            self.expiry,
        )
        .await
    }
}
