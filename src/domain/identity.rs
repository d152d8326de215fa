//! Managed identity backend seam.
//!
//! Passwords are only ever forwarded to the provider; the provider owns
//! accounts, refresh tokens and custom role claims.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use super::auth::Role;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("email already registered")]
    EmailExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired provider refresh token")]
    InvalidRefreshToken,
    #[error("no account for {0}")]
    UserNotFound(String),
    /// The provider refused the request for a reason the user can fix
    /// (weak password, malformed email, ...)
    #[error("rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// An account as known to the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub claims: Map<String, Value>,
}

impl Identity {
    pub fn role(&self) -> Role {
        role_from_claims(&self.claims)
    }
}

/// Result of a sign-up, sign-in or token refresh at the provider
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub identity: Identity,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// `admin: true` in the custom claims makes an administrator; anything else
/// is a regular user.
pub fn role_from_claims(claims: &Map<String, Value>) -> Role {
    match claims.get("admin") {
        Some(Value::Bool(true)) => Role::Admin,
        _ => Role::User,
    }
}

pub fn claims_for_role(role: Role) -> Map<String, Value> {
    let mut claims = Map::new();
    claims.insert("admin".to_string(), Value::Bool(role.is_admin()));
    claims
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError>;

    /// Exchange a provider refresh token for a fresh session carrying the
    /// latest custom claims.
    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, IdentityError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Replace the account's custom claims
    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: Map<String, Value>,
    ) -> Result<(), IdentityError>;
}
