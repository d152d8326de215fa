use crate::application::profiles::get::ProfileResponse;
use crate::domain::profiles::{ProfileCollection, ProfileRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::PageParams;
use std::sync::Arc;

pub struct ListProfilesUseCase {
    repo: Arc<dyn ProfileRepository>,
}

impl ListProfilesUseCase {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// One page of a collection, newest first, with the collection total
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        collection: ProfileCollection,
        page: &PageParams,
    ) -> Result<(Vec<ProfileResponse>, i64), AppError> {
        let (profiles, total) = futures::try_join!(
            self.repo.find_all(collection, page.limit(), page.offset()),
            self.repo.count(collection),
        )?;

        Ok((profiles.into_iter().map(Into::into).collect(), total))
    }
}
