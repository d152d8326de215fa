use crate::application::auth::token_utils::hash_token;
use crate::domain::auth::SessionRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LogoutRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Ends the session bound to a refresh token. The provider's own refresh
/// token is dropped with it.
pub struct LogoutUseCase {
    sessions: Arc<dyn SessionRepository>,
}

impl LogoutUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, uid: &str, req: LogoutRequest) -> Result<(), AppError> {
        let token_hash = hash_token(&req.refresh_token);
        let session = self
            .sessions
            .find_by_hash(&token_hash)
            .await?
            .filter(|s| s.uid == uid)
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

        self.sessions.delete_by_hash(&session.token_hash).await?;
        tracing::info!(uid, "session ended");
        Ok(())
    }
}
