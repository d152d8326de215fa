use crate::application::alerts::preferences::GetAlertPreferencesUseCase;
use crate::domain::alerts::AlertPreferencesRepository;
use crate::domain::events::{DisasterEvent, EventFilter, EventRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use time::OffsetDateTime;
use utoipa::IntoParams;

pub const DEFAULT_WINDOW_HOURS: i64 = 24;
const MAX_CANDIDATES: i64 = 500;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MatchingAlertsQuery {
    /// Look-back window, defaults to 24 hours
    pub since_hours: Option<i64>,
}

pub struct MatchingAlertsUseCase {
    preferences: Arc<dyn AlertPreferencesRepository>,
    events: Arc<dyn EventRepository>,
}

impl MatchingAlertsUseCase {
    pub fn new(
        preferences: Arc<dyn AlertPreferencesRepository>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            preferences,
            events,
        }
    }

    /// Recent events the user's preferences would alert on, newest first
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        uid: &str,
        query: &MatchingAlertsQuery,
    ) -> Result<Vec<DisasterEvent>, AppError> {
        let hours = query.since_hours.unwrap_or(DEFAULT_WINDOW_HOURS);
        if hours <= 0 {
            return Err(AppError::ValidationError(
                "sinceHours must be positive".to_string(),
            ));
        }

        let prefs = GetAlertPreferencesUseCase::new(self.preferences.clone())
            .load(uid)
            .await?;
        if !prefs.notifications_enabled {
            return Ok(Vec::new());
        }

        let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        let filter = EventFilter {
            kind: None,
            min_magnitude: Some(prefs.magnitude_threshold),
            since: Some(now_ms - hours.saturating_mul(3_600_000)),
        };
        let events = self.events.find_recent(&filter, MAX_CANDIDATES, 0).await?;

        Ok(events
            .into_iter()
            .filter(|event| prefs.should_alert(event))
            .collect())
    }
}
