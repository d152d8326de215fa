use crate::application::events::list::EventFilterParams;
use crate::domain::events::{EventRepository, MapMarker};
use crate::shared::error::AppError;
use std::sync::Arc;
use time::OffsetDateTime;

/// Upper bound on markers drawn at once
pub const MAX_MARKERS: i64 = 500;

pub struct ListMarkersUseCase {
    repo: Arc<dyn EventRepository>,
}

impl ListMarkersUseCase {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, params: &EventFilterParams) -> Result<Vec<MapMarker>, AppError> {
        let filter = params.to_filter(OffsetDateTime::now_utc())?;
        let events = self.repo.find_recent(&filter, MAX_MARKERS, 0).await?;
        Ok(events.iter().map(MapMarker::from).collect())
    }
}
