//! Firebase Authentication over its REST surface (Identity Toolkit for
//! accounts, Secure Token for refresh).

use crate::domain::identity::{Identity, IdentityError, IdentityProvider, ProviderSession};
use crate::infrastructure::config::FirebaseConfig;
use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::{Map, Value, json};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Claims Firebase puts in its ID tokens that are not custom claims
const RESERVED_CLAIMS: [&str; 14] = [
    "iss",
    "aud",
    "auth_time",
    "user_id",
    "sub",
    "iat",
    "exp",
    "email",
    "email_verified",
    "firebase",
    "name",
    "picture",
    "phone_number",
    "uid",
];

pub struct FirebaseIdentityProvider {
    http: reqwest::Client,
    api_key: String,
    project_id: String,
    service_token: Option<String>,
    identity_toolkit_url: String,
    secure_token_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordAuthResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct SecureTokenResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    /// JSON-encoded object
    custom_attributes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseIdentityProvider {
    pub fn new(config: &FirebaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            project_id: config.project_id.clone(),
            service_token: config.service_token.clone(),
            identity_toolkit_url: IDENTITY_TOOLKIT_URL.to_string(),
            secure_token_url: SECURE_TOKEN_URL.to_string(),
        }
    }

    /// Point both REST surfaces at another host (emulator or test stub)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.identity_toolkit_url = format!("{}/v1", base);
        self.secure_token_url = format!("{}/v1", base);
        self
    }

    fn service_token(&self) -> Result<&str, IdentityError> {
        self.service_token.as_deref().ok_or_else(|| {
            IdentityError::Upstream(anyhow::anyhow!(
                "FIREBASE_SERVICE_TOKEN is required for admin operations"
            ))
        })
    }

    async fn password_auth(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, IdentityError> {
        let url = format!("{}/accounts:{}", self.identity_toolkit_url, action);
        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| IdentityError::Upstream(e.into()))?;

        let body: PasswordAuthResponse = read_json(response).await?;
        Ok(ProviderSession {
            identity: Identity {
                uid: body.local_id,
                email: body.email,
                claims: custom_claims_from_id_token(&body.id_token)?,
            },
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_in: body.expires_in.parse().unwrap_or(3600),
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    #[tracing::instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError> {
        self.password_auth("signUp", email, password).await
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError> {
        self.password_auth("signInWithPassword", email, password)
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, IdentityError> {
        let url = format!("{}/token", self.secure_token_url);
        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| IdentityError::Upstream(e.into()))?;

        let body: SecureTokenResponse = read_json(response).await?;
        let claims = decode_id_token(&body.id_token)?;
        let email = claims
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(ProviderSession {
            identity: Identity {
                uid: body.user_id,
                email,
                claims: strip_reserved(claims),
            },
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_in: body.expires_in.parse().unwrap_or(3600),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let url = format!(
            "{}/projects/{}/accounts:lookup",
            self.identity_toolkit_url, self.project_id
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(self.service_token()?)
            .json(&json!({ "email": [email] }))
            .send()
            .await
            .map_err(|e| IdentityError::Upstream(e.into()))?;

        let body: LookupResponse = read_json(response).await?;
        body.users
            .into_iter()
            .next()
            .map(|user| {
                let claims = match user.custom_attributes.as_deref() {
                    Some(raw) if !raw.is_empty() => serde_json::from_str(raw).map_err(|e| {
                        IdentityError::Upstream(anyhow::anyhow!(
                            "customAttributes is not a JSON object: {}",
                            e
                        ))
                    })?,
                    _ => Map::new(),
                };
                Ok(Identity {
                    uid: user.local_id,
                    email: user.email,
                    claims,
                })
            })
            .transpose()
    }

    #[tracing::instrument(skip(self, claims))]
    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: Map<String, Value>,
    ) -> Result<(), IdentityError> {
        let url = format!(
            "{}/projects/{}/accounts:update",
            self.identity_toolkit_url, self.project_id
        );
        let attributes = serde_json::to_string(&claims)
            .map_err(|e| IdentityError::Upstream(e.into()))?;
        let response = self
            .http
            .post(url)
            .bearer_auth(self.service_token()?)
            .json(&json!({
                "localId": uid,
                "customAttributes": attributes,
            }))
            .send()
            .await
            .map_err(|e| IdentityError::Upstream(e.into()))?;

        let _: Value = read_json(response).await?;
        tracing::info!(uid, "custom claims updated");
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| IdentityError::Upstream(e.into()));
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&text)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("{}: {}", status, text));
    Err(map_error_code(&message))
}

/// Map Identity Toolkit error codes (`EMAIL_EXISTS`, `WEAK_PASSWORD : ...`)
/// onto domain errors.
fn map_error_code(message: &str) -> IdentityError {
    let code = message.split([' ', ':']).next().unwrap_or(message);
    match code {
        "EMAIL_EXISTS" => IdentityError::EmailExists,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            IdentityError::InvalidCredentials
        }
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" | "INVALID_GRANT_TYPE" => {
            IdentityError::InvalidRefreshToken
        }
        "WEAK_PASSWORD" | "INVALID_EMAIL" | "MISSING_PASSWORD" => {
            IdentityError::Rejected(message.to_string())
        }
        _ => IdentityError::Upstream(anyhow::anyhow!("identity toolkit: {}", message)),
    }
}

/// Read the payload of an ID token that was just handed to us by the
/// provider over TLS. The signature is not checked here.
fn decode_id_token(id_token: &str) -> Result<Map<String, Value>, IdentityError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Map<String, Value>>(id_token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| IdentityError::Upstream(anyhow::anyhow!("malformed ID token: {}", e)))
}

fn custom_claims_from_id_token(id_token: &str) -> Result<Map<String, Value>, IdentityError> {
    decode_id_token(id_token).map(strip_reserved)
}

fn strip_reserved(mut claims: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_CLAIMS {
        claims.remove(key);
    }
    claims
}
