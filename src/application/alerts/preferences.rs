use crate::domain::alerts::{AlertPreferences, AlertPreferencesRepository};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertPreferencesResponse {
    pub notifications_enabled: bool,
    pub location: String,
    pub magnitude_threshold: f64,
}

impl From<AlertPreferences> for AlertPreferencesResponse {
    fn from(prefs: AlertPreferences) -> Self {
        Self {
            notifications_enabled: prefs.notifications_enabled,
            location: prefs.location,
            magnitude_threshold: prefs.magnitude_threshold,
        }
    }
}

/// Fields left out keep their saved (or default) value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAlertPreferencesRequest {
    pub notifications_enabled: Option<bool>,

    #[validate(length(max = 200, message = "Location is too long"))]
    #[schema(example = "Yangon, Myanmar")]
    pub location: Option<String>,

    #[validate(range(min = 0.0, max = 10.0, message = "Magnitude threshold must be between 0 and 10"))]
    #[schema(example = 4.5)]
    pub magnitude_threshold: Option<f64>,
}

pub struct GetAlertPreferencesUseCase {
    repo: Arc<dyn AlertPreferencesRepository>,
}

impl GetAlertPreferencesUseCase {
    pub fn new(repo: Arc<dyn AlertPreferencesRepository>) -> Self {
        Self { repo }
    }

    pub async fn load(&self, uid: &str) -> Result<AlertPreferences, AppError> {
        Ok(self.repo.find(uid).await?.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, uid: &str) -> Result<AlertPreferencesResponse, AppError> {
        self.load(uid).await.map(Into::into)
    }
}

pub struct SaveAlertPreferencesUseCase {
    repo: Arc<dyn AlertPreferencesRepository>,
}

impl SaveAlertPreferencesUseCase {
    pub fn new(repo: Arc<dyn AlertPreferencesRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        uid: &str,
        req: SaveAlertPreferencesRequest,
    ) -> Result<AlertPreferencesResponse, AppError> {
        let current = self.repo.find(uid).await?.unwrap_or_default();
        let merged = AlertPreferences {
            notifications_enabled: req
                .notifications_enabled
                .unwrap_or(current.notifications_enabled),
            location: req
                .location
                .map(|l| l.trim().to_string())
                .unwrap_or(current.location),
            magnitude_threshold: req
                .magnitude_threshold
                .unwrap_or(current.magnitude_threshold),
        };

        let saved = self.repo.save(uid, merged).await?;
        tracing::info!("alert preferences saved");
        Ok(saved.into())
    }
}
