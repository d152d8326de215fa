use crate::domain::auth::{Role, SessionRepository};
use crate::domain::identity::{IdentityProvider, claims_for_role};
use crate::shared::error::AppError;
use crate::shared::validation::validate_email_format;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoleAssignmentRequest {
    #[validate(custom(function = "validate_email_format"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleAssignmentResponse {
    pub message: String,
    pub uid: String,
    pub email: String,
    pub role: Role,
}

/// Grants or revokes the `admin` custom claim on an account
pub struct AssignRoleUseCase {
    identity: Arc<dyn IdentityProvider>,
    sessions: Arc<dyn SessionRepository>,
}

impl AssignRoleUseCase {
    pub fn new(identity: Arc<dyn IdentityProvider>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { identity, sessions }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(
        &self,
        req: RoleAssignmentRequest,
        role: Role,
    ) -> Result<RoleAssignmentResponse, AppError> {
        let account = self
            .identity
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No account found for {}", req.email)))?;

        let mut claims = account.claims.clone();
        claims.extend(claims_for_role(role));
        self.identity
            .set_custom_claims(&account.uid, claims)
            .await?;

        // Sessions carry the role they were issued with
        if !role.is_admin() {
            let ended = self.sessions.delete_by_uid(&account.uid).await?;
            tracing::info!(uid = %account.uid, ended, "sessions ended after admin role removal");
        }

        let message = match role {
            Role::Admin => format!("Admin role set for {}", req.email),
            Role::User => format!("Admin role removed for {}", req.email),
        };

        Ok(RoleAssignmentResponse {
            message,
            uid: account.uid,
            email: req.email,
            role,
        })
    }
}
