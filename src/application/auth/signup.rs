use crate::application::auth::token_utils::{TokenExpiry, TokenResponse, issue_session};
use crate::domain::auth::{AuthService, SessionRepository};
use crate::domain::identity::IdentityProvider;
use crate::domain::profiles::{Gender, ProfileCollection, ProfilePatch, ProfileRepository};
use crate::shared::error::AppError;
use crate::shared::validation::{
    validate_date_of_birth, validate_email_format, validate_location, validate_not_blank,
    validate_password_strength, validate_phone_number, validate_terms_accepted,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(custom(function = "validate_email_format"))]
    #[schema(example = "aung@example.com")]
    pub email: String,

    #[validate(custom(function = "validate_password_strength"))]
    #[schema(example = "Str0ng!pass", min_length = 8)]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    #[validate(
        length(max = 255, message = "Full name is too long"),
        custom(function = "validate_not_blank", message = "Full name is required")
    )]
    #[schema(example = "Aung Aung")]
    pub full_name: String,

    #[validate(custom(function = "validate_phone_number"))]
    #[schema(example = "09-123-4567")]
    pub phone: String,

    pub gender: Gender,

    #[validate(custom(function = "validate_date_of_birth"))]
    #[schema(example = "1990-05-17")]
    pub date_of_birth: String,

    #[validate(custom(function = "validate_location"))]
    #[schema(example = "Yangon")]
    pub location: String,

    #[validate(custom(function = "validate_terms_accepted"))]
    pub agree_to_terms: bool,
}

pub struct SignupUseCase {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    sessions: Arc<dyn SessionRepository>,
    auth_service: Arc<dyn AuthService>,
    expiry: TokenExpiry,
}

impl SignupUseCase {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        sessions: Arc<dyn SessionRepository>,
        auth_service: Arc<dyn AuthService>,
        expiry: TokenExpiry,
    ) -> Self {
        Self {
            identity,
            profiles,
            sessions,
            auth_service,
            expiry,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: SignupRequest) -> Result<TokenResponse, AppError> {
        let created = self.identity.sign_up(&req.email, &req.password).await?;

        self.profiles
            .upsert_merge(
                ProfileCollection::Users,
                &created.identity.email,
                ProfilePatch {
                    uid: Some(created.identity.uid.clone()),
                    full_name: Some(req.full_name.trim().to_string()),
                    phone: Some(req.phone),
                    gender: Some(req.gender),
                    date_of_birth: Some(req.date_of_birth),
                    location: Some(req.location),
                },
            )
            .await?;

        tracing::info!(uid = %created.identity.uid, "account created");

        issue_session(
            &created.identity,
            created.refresh_token,
            &self.auth_service,
            &self.sessions,
            self.expiry,
        )
        .await
    }
}
