use crate::domain::events::{DisasterEvent, EventFilter, EventRepository, NewDisasterEvent};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::events::DisasterEventDbModel;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Shared WHERE clause; $1 kind, $2 minimum magnitude, $3 since (unix ms)
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::TEXT IS NULL OR LOWER(kind) = LOWER($1))
      AND ($2::DOUBLE PRECISION IS NULL OR magnitude >= $2)
      AND ($3::BIGINT IS NULL OR occurred_at >= $3)
"#;

pub struct PostgresEventRepository {
    pool: DbPool,
}

impl PostgresEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    #[tracing::instrument(skip(self, event), fields(kind = %event.kind))]
    async fn create(&self, event: NewDisasterEvent) -> Result<DisasterEvent> {
        let row = sqlx::query_as::<_, DisasterEventDbModel>(
            r#"
            INSERT INTO disaster_events (id, kind, magnitude, place, occurred_at, latitude, longitude, depth)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, kind, magnitude, place, occurred_at, latitude, longitude, depth
            "#,
        )
        .bind(Uuid::new_v4().simple().to_string())
        .bind(&event.kind)
        .bind(event.magnitude)
        .bind(&event.place)
        .bind(event.time)
        .bind(event.coordinates.latitude)
        .bind(event.coordinates.longitude)
        .bind(event.depth)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<DisasterEvent>> {
        let row = sqlx::query_as::<_, DisasterEventDbModel>(
            r#"
            SELECT id, kind, magnitude, place, occurred_at, latitude, longitude, depth
            FROM disaster_events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_recent(
        &self,
        filter: &EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DisasterEvent>> {
        let query = format!(
            r#"
            SELECT id, kind, magnitude, place, occurred_at, latitude, longitude, depth
            FROM disaster_events
            {}
            ORDER BY occurred_at DESC
            LIMIT $4 OFFSET $5
            "#,
            FILTER_CLAUSE
        );
        let rows = sqlx::query_as::<_, DisasterEventDbModel>(&query)
            .bind(&filter.kind)
            .bind(filter.min_magnitude)
            .bind(filter.since)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &EventFilter) -> Result<i64> {
        let query = format!("SELECT COUNT(*) FROM disaster_events {}", FILTER_CLAUSE);
        let count: i64 = sqlx::query_scalar(&query)
            .bind(&filter.kind)
            .bind(filter.min_magnitude)
            .bind(filter.since)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
