use crate::domain::events::{DisasterEvent, EventRepository};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct GetEventUseCase {
    repo: Arc<dyn EventRepository>,
}

impl GetEventUseCase {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: &str) -> Result<DisasterEvent, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }
}
