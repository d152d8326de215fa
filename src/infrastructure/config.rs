use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Which identity backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityBackend {
    Firebase,
    /// Process-local accounts, for development without a Firebase project
    Memory,
}

impl FromStr for IdentityBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "firebase" => Ok(IdentityBackend::Firebase),
            "memory" => Ok(IdentityBackend::Memory),
            other => Err(anyhow::anyhow!("Unknown IDENTITY_BACKEND: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    /// OAuth access token of a service account, used for admin calls
    /// (account lookup, custom claims)
    pub service_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub private_key_path: String,
    pub public_key_path: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

/// Process configuration, read once at startup from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub identity_backend: IdentityBackend,
    pub firebase: Option<FirebaseConfig>,
    pub gemini: GeminiConfig,
    pub maps_api_key: Option<String>,
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let identity_backend: IdentityBackend = env::var("IDENTITY_BACKEND")
            .unwrap_or_else(|_| "firebase".to_string())
            .parse()?;

        let firebase = match identity_backend {
            IdentityBackend::Firebase => Some(FirebaseConfig {
                api_key: env::var("FIREBASE_API_KEY")
                    .context("FIREBASE_API_KEY must be set when IDENTITY_BACKEND=firebase")?,
                project_id: env::var("FIREBASE_PROJECT_ID")
                    .context("FIREBASE_PROJECT_ID must be set when IDENTITY_BACKEND=firebase")?,
                service_token: optional_var("FIREBASE_SERVICE_TOKEN"),
            }),
            IdentityBackend::Memory => None,
        };

        let gemini_api_key = optional_var("GEMINI_API_KEY");
        if gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; assistant requests will fail");
        }

        Ok(Self {
            port: var_or("PORT", 3000),
            database_url,
            jwt: JwtConfig {
                private_key_path: env::var("JWT_PRIVATE_KEY_PATH")
                    .unwrap_or_else(|_| "keys/private_key.pem".to_string()),
                public_key_path: env::var("JWT_PUBLIC_KEY_PATH")
                    .unwrap_or_else(|_| "keys/public_key.pem".to_string()),
                access_token_expiry: var_or("JWT_ACCESS_TOKEN_EXPIRY", 900),
                refresh_token_expiry: var_or("JWT_REFRESH_TOKEN_EXPIRY", 604800),
            },
            identity_backend,
            firebase,
            gemini: GeminiConfig {
                api_key: gemini_api_key,
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            },
            maps_api_key: optional_var("GOOGLE_MAPS_API_KEY"),
        })
    }
}
