use crate::domain::profiles::{Profile, ProfileCollection, ProfileRepository};
use crate::shared::error::AppError;
use serde::Serialize;
use std::sync::Arc;
use time::format_description::well_known::Iso8601;
use utoipa::ToSchema;

/// Shown for any field the profile document does not have
pub const PLACEHOLDER: &str = "-";

/// Display form of a profile. Missing documents and missing fields read
/// as `-`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub email: String,
    pub uid: Option<String>,
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    pub date_of_birth: String,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
}

fn or_placeholder(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn timestamp(value: time::OffsetDateTime) -> String {
    value
        .format(&Iso8601::DEFAULT)
        .unwrap_or_else(|_| PLACEHOLDER.to_string())
}

impl ProfileResponse {
    pub fn placeholder(email: &str) -> Self {
        Self {
            email: email.to_string(),
            uid: None,
            full_name: PLACEHOLDER.to_string(),
            phone: PLACEHOLDER.to_string(),
            gender: PLACEHOLDER.to_string(),
            date_of_birth: PLACEHOLDER.to_string(),
            location: PLACEHOLDER.to_string(),
            created_at: PLACEHOLDER.to_string(),
            updated_at: PLACEHOLDER.to_string(),
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            email: profile.email,
            uid: profile.uid,
            full_name: or_placeholder(profile.full_name),
            phone: or_placeholder(profile.phone),
            gender: or_placeholder(profile.gender.map(|g| g.to_string())),
            date_of_birth: or_placeholder(profile.date_of_birth),
            location: or_placeholder(profile.location),
            created_at: timestamp(profile.created_at),
            updated_at: timestamp(profile.updated_at),
        }
    }
}

pub struct GetProfileUseCase {
    repo: Arc<dyn ProfileRepository>,
}

impl GetProfileUseCase {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        collection: ProfileCollection,
        email: &str,
    ) -> Result<ProfileResponse, AppError> {
        let profile = self.repo.find_by_email(collection, email).await?;
        Ok(match profile {
            Some(profile) => profile.into(),
            None => {
                tracing::debug!("no profile document, returning placeholder");
                ProfileResponse::placeholder(email)
            }
        })
    }
}
