use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Role carried in session tokens. Derived from the identity provider's
/// custom claims at login and refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity provider uid)
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    /// Token type: "access" or "refresh"
    #[serde(rename = "type")]
    pub token_type: String,
    /// Unique token id so two tokens minted in the same second still differ
    pub jti: String,
}

impl Claims {
    pub fn new_access_token(uid: &str, email: &str, role: Role, expiry_seconds: i64) -> Self {
        Self::new(uid, email, role, "access", expiry_seconds)
    }

    pub fn new_refresh_token(uid: &str, email: &str, role: Role, expiry_seconds: i64) -> Self {
        Self::new(uid, email, role, "refresh", expiry_seconds)
    }

    fn new(uid: &str, email: &str, role: Role, token_type: &str, expiry_seconds: i64) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            sub: uid.to_string(),
            email: email.to_string(),
            role,
            iat: now,
            exp: now + expiry_seconds,
            token_type: token_type.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn is_access(&self) -> bool {
        self.token_type == "access"
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == "refresh"
    }
}

/// Signed session token service
pub trait AuthService: Send + Sync {
    fn generate_access_token(&self, uid: &str, email: &str, role: Role) -> Result<String>;

    fn generate_refresh_token(&self, uid: &str, email: &str, role: Role) -> Result<String>;

    fn validate_token(&self, token: &str) -> Result<Claims>;
}

/// A stored login session, keyed by the hash of the refresh token we issued.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub token_hash: String,
    /// Refresh token issued by the identity provider for this login
    pub provider_refresh_token: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub token_hash: String,
    pub provider_refresh_token: String,
    pub expires_at: OffsetDateTime,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: NewSession) -> Result<Session>;

    /// Find a live (unexpired) session by refresh token hash
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<Session>>;

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool>;

    async fn delete_by_uid(&self, uid: &str) -> Result<u64>;

    async fn delete_expired(&self) -> Result<u64>;
}
