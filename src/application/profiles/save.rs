use crate::application::profiles::get::ProfileResponse;
use crate::domain::profiles::{Gender, ProfileCollection, ProfilePatch, ProfileRepository};
use crate::shared::error::AppError;
use crate::shared::validation::{
    validate_date_of_birth, validate_location, validate_not_blank, validate_phone_number,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Profile edit form. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct SaveProfileRequest {
    #[validate(
        length(max = 255, message = "Full name is too long"),
        custom(function = "validate_not_blank", message = "Full name must not be empty")
    )]
    pub full_name: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone: Option<String>,

    pub gender: Option<Gender>,

    #[validate(custom(function = "validate_date_of_birth"))]
    pub date_of_birth: Option<String>,

    #[validate(custom(function = "validate_location"))]
    pub location: Option<String>,
}

impl SaveProfileRequest {
    fn has_changes(&self) -> bool {
        self.full_name.is_some()
            || self.phone.is_some()
            || self.gender.is_some()
            || self.date_of_birth.is_some()
            || self.location.is_some()
    }

    fn into_patch(self, uid: Option<String>) -> ProfilePatch {
        ProfilePatch {
            uid,
            full_name: self.full_name.map(|n| n.trim().to_string()),
            phone: self.phone,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            location: self.location,
        }
    }
}

pub struct SaveProfileUseCase {
    repo: Arc<dyn ProfileRepository>,
}

impl SaveProfileUseCase {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Update the document; when it does not exist yet, create it with the
    /// submitted fields merged in.
    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        collection: ProfileCollection,
        email: &str,
        uid: Option<String>,
        req: SaveProfileRequest,
    ) -> Result<ProfileResponse, AppError> {
        if !req.has_changes() {
            return Err(AppError::ValidationError(
                "At least one profile field must be provided".to_string(),
            ));
        }
        let patch = req.into_patch(uid);

        if let Some(updated) = self.repo.update(collection, email, patch.clone()).await? {
            return Ok(updated.into());
        }

        tracing::info!("profile document missing, creating with merge");
        let created = self.repo.upsert_merge(collection, email, patch).await?;
        Ok(created.into())
    }
}
