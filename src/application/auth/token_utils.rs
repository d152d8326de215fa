use crate::domain::auth::{AuthService, NewSession, Role, SessionRepository};
use crate::domain::identity::Identity;
use crate::shared::error::AppError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use time::OffsetDateTime;

/// Token pair handed to the client after sign-up, login and refresh
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub uid: String,
    pub email: String,
    pub role: Role,
}

/// Token lifetimes in seconds
#[derive(Debug, Clone, Copy)]
pub struct TokenExpiry {
    pub access: i64,
    pub refresh: i64,
}

/// SHA-256 hex digest of a token string
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sign a token pair for the identity and record the session, keeping the
/// provider's refresh token alongside the hash of ours.
pub async fn issue_session(
    identity: &Identity,
    provider_refresh_token: String,
    auth_service: &Arc<dyn AuthService>,
    sessions: &Arc<dyn SessionRepository>,
    expiry: TokenExpiry,
) -> Result<TokenResponse, AppError> {
    let role = identity.role();

    let access_token = auth_service.generate_access_token(&identity.uid, &identity.email, role)?;
    let refresh_token =
        auth_service.generate_refresh_token(&identity.uid, &identity.email, role)?;

    sessions
        .create(NewSession {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            role,
            token_hash: hash_token(&refresh_token),
            provider_refresh_token,
            expires_at: OffsetDateTime::now_utc() + time::Duration::seconds(expiry.refresh),
        })
        .await?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: expiry.access,
        uid: identity.uid.clone(),
        email: identity.email.clone(),
        role,
    })
}
