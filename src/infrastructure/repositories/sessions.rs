use crate::domain::auth::{NewSession, Session, SessionRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::sessions::SessionDbModel;
use anyhow::Result;
use async_trait::async_trait;

pub struct PostgresSessionRepository {
    pool: DbPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    #[tracing::instrument(skip(self, session), fields(uid = %session.uid))]
    async fn create(&self, session: NewSession) -> Result<Session> {
        let row = sqlx::query_as::<_, SessionDbModel>(
            r#"
            INSERT INTO sessions (uid, email, role, token_hash, provider_refresh_token, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, uid, email, role, token_hash, provider_refresh_token, expires_at, created_at
            "#,
        )
        .bind(&session.uid)
        .bind(&session.email)
        .bind(session.role.to_string())
        .bind(&session.token_hash)
        .bind(&session.provider_refresh_token)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionDbModel>(
            r#"
            SELECT id, uid, email, role, token_hash, provider_refresh_token, expires_at, created_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Session::try_from).transpose()
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_uid(&self, uid: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at <= NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
