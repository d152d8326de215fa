use crate::domain::resources::{Resource, ResourceKind, ResourceRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ResourceListQuery {
    #[serde(default)]
    pub filter: ResourceFilterParams,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceFilterParams {
    /// `shelter`, `medical`, `food`, `water` or `other`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub struct ListResourcesUseCase {
    repo: Arc<dyn ResourceRepository>,
}

impl ListResourcesUseCase {
    pub fn new(repo: Arc<dyn ResourceRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, query: &ResourceListQuery) -> Result<Vec<Resource>, AppError> {
        let kind = query
            .filter
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| k.to_lowercase().parse::<ResourceKind>())
            .transpose()
            .map_err(AppError::ValidationError)?;

        let resources = match kind {
            Some(kind) => self.repo.find_by_kind(kind).await?,
            None => self.repo.find_all().await?,
        };
        Ok(resources)
    }
}
