use crate::domain::alerts::{AlertPreferences, AlertPreferencesRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::alerts::AlertPreferencesDbModel;
use anyhow::Result;
use async_trait::async_trait;

pub struct PostgresAlertPreferencesRepository {
    pool: DbPool,
}

impl PostgresAlertPreferencesRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertPreferencesRepository for PostgresAlertPreferencesRepository {
    async fn find(&self, uid: &str) -> Result<Option<AlertPreferences>> {
        let row = sqlx::query_as::<_, AlertPreferencesDbModel>(
            r#"
            SELECT uid, notifications_enabled, location, magnitude_threshold
            FROM alert_preferences
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self, preferences))]
    async fn save(&self, uid: &str, preferences: AlertPreferences) -> Result<AlertPreferences> {
        let row = sqlx::query_as::<_, AlertPreferencesDbModel>(
            r#"
            INSERT INTO alert_preferences (uid, notifications_enabled, location, magnitude_threshold)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (uid) DO UPDATE
            SET notifications_enabled = EXCLUDED.notifications_enabled,
                location = EXCLUDED.location,
                magnitude_threshold = EXCLUDED.magnitude_threshold,
                updated_at = NOW()
            RETURNING uid, notifications_enabled, location, magnitude_threshold
            "#,
        )
        .bind(uid)
        .bind(preferences.notifications_enabled)
        .bind(&preferences.location)
        .bind(preferences.magnitude_threshold)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
