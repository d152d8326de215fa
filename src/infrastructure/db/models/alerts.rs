use crate::domain::alerts::AlertPreferences;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AlertPreferencesDbModel {
    pub uid: String,
    pub notifications_enabled: bool,
    pub location: String,
    pub magnitude_threshold: f64,
}

impl From<AlertPreferencesDbModel> for AlertPreferences {
    fn from(model: AlertPreferencesDbModel) -> Self {
        Self {
            notifications_enabled: model.notifications_enabled,
            location: model.location,
            magnitude_threshold: model.magnitude_threshold,
        }
    }
}
