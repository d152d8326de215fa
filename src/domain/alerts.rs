use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::events::DisasterEvent;

pub const DEFAULT_ALERT_LOCATION: &str = "Yangon, Myanmar";
pub const DEFAULT_MAGNITUDE_THRESHOLD: f64 = 4.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPreferences {
    pub notifications_enabled: bool,
    pub location: String,
    pub magnitude_threshold: f64,
}

impl Default for AlertPreferences {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            location: DEFAULT_ALERT_LOCATION.to_string(),
            magnitude_threshold: DEFAULT_MAGNITUDE_THRESHOLD,
        }
    }
}

impl AlertPreferences {
    /// Place keyword taken from the first comma-separated part of the
    /// location ("Yangon, Myanmar" -> "yangon"). Empty means "anywhere".
    fn place_keyword(&self) -> String {
        self.location
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase()
    }

    pub fn should_alert(&self, event: &DisasterEvent) -> bool {
        if !self.notifications_enabled || event.magnitude < self.magnitude_threshold {
            return false;
        }
        let keyword = self.place_keyword();
        keyword.is_empty() || event.place.to_lowercase().contains(&keyword)
    }
}

#[async_trait]
pub trait AlertPreferencesRepository: Send + Sync {
    async fn find(&self, uid: &str) -> Result<Option<AlertPreferences>, anyhow::Error>;

    async fn save(
        &self,
        uid: &str,
        preferences: AlertPreferences,
    ) -> Result<AlertPreferences, anyhow::Error>;
}
