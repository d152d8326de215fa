use crate::domain::events::{DisasterEvent, EventFilter, EventRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::PageParams;
use serde::Deserialize;
use std::sync::Arc;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// `filter[...]` query parameters for event listings
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventFilterParams {
    /// Event type, case-insensitive (`earthquake`, `flood`, ...)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub min_magnitude: Option<f64>,
    /// Only events from the last N hours
    pub since_hours: Option<i64>,
}

impl EventFilterParams {
    pub fn to_filter(&self, now: OffsetDateTime) -> Result<EventFilter, AppError> {
        if self
            .min_magnitude
            .is_some_and(|min| !(0.0..=10.0).contains(&min))
        {
            return Err(AppError::ValidationError(
                "filter[minMagnitude] must be between 0 and 10".to_string(),
            ));
        }
        if self.since_hours.is_some_and(|hours| hours <= 0) {
            return Err(AppError::ValidationError(
                "filter[sinceHours] must be positive".to_string(),
            ));
        }

        let now_ms = (now.unix_timestamp_nanos() / 1_000_000) as i64;
        Ok(EventFilter {
            kind: self
                .kind
                .as_ref()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            min_magnitude: self.min_magnitude,
            since: self
                .since_hours
                .map(|hours| now_ms - hours.saturating_mul(3_600_000)),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EventListQuery {
    #[serde(default)]
    pub page: PageParams,
    #[serde(default)]
    pub filter: EventFilterParams,
}

pub struct ListEventsUseCase {
    repo: Arc<dyn EventRepository>,
}

impl ListEventsUseCase {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        query: &EventListQuery,
    ) -> Result<(Vec<DisasterEvent>, i64), AppError> {
        let filter = query.filter.to_filter(OffsetDateTime::now_utc())?;
        let (events, total) = futures::try_join!(
            self.repo
                .find_recent(&filter, query.page.limit(), query.page.offset()),
            self.repo.count(&filter),
        )?;
        Ok((events, total))
    }
}
