use crate::application::auth::token_utils::{TokenExpiry, TokenResponse};
use crate::domain::auth::Role;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use serde::Serialize;
use utoipa::ToSchema;

pub type AuthTokenDocument = JsonApiResponse<JsonApiResource<TokenResponse>>;

/// `auth-tokens` resource keyed by uid
pub fn token_document(tokens: TokenResponse) -> AuthTokenDocument {
    let uid = tokens.uid.clone();
    JsonApiResponse::new(JsonApiResource::new("auth-tokens", uid, tokens))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUserResource {
    pub uid: String,
    pub email: String,
    pub role: Role,
}

impl From<AuthUser> for CurrentUserResource {
    fn from(user: AuthUser) -> Self {
        Self {
            uid: user.claims.sub,
            email: user.claims.email,
            role: user.claims.role,
        }
    }
}

/// Session lifetimes as configured on the token signer
pub fn token_expiry(state: &AppState) -> TokenExpiry {
    TokenExpiry {
        access: state.auth_service.access_token_expiry(),
        refresh: state.auth_service.refresh_token_expiry(),
    }
}
