use crate::domain::resources::{Resource, ResourceKind, ResourceRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::resources::ResourceDbModel;
use anyhow::Result;
use async_trait::async_trait;

pub struct PostgresResourceRepository {
    pool: DbPool,
}

impl PostgresResourceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PostgresResourceRepository {
    async fn find_all(&self) -> Result<Vec<Resource>> {
        let rows = sqlx::query_as::<_, ResourceDbModel>(
            r#"
            SELECT id, name, kind, address, contact, operating_hours, notes, latitude, longitude
            FROM resources
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Resource::try_from).collect()
    }

    async fn find_by_kind(&self, kind: ResourceKind) -> Result<Vec<Resource>> {
        let rows = sqlx::query_as::<_, ResourceDbModel>(
            r#"
            SELECT id, name, kind, address, contact, operating_hours, notes, latitude, longitude
            FROM resources
            WHERE kind = $1
            ORDER BY id
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Resource::try_from).collect()
    }
}
