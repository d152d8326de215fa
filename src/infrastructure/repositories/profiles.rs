use crate::domain::profiles::{NewProfile, Profile, ProfileCollection, ProfilePatch, ProfileRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::profiles::ProfileDbModel;
use anyhow::Result;
use async_trait::async_trait;

const PROFILE_COLUMNS: &str = "id, collection, email, uid, full_name, phone, gender, \
                               date_of_birth, location, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: DbPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    #[tracing::instrument(skip(self, profile), fields(collection = %profile.collection))]
    async fn create(&self, profile: NewProfile) -> Result<Profile> {
        let query = format!(
            r#"
            INSERT INTO profiles (collection, email, uid, full_name, phone, gender, date_of_birth, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, ProfileDbModel>(&query)
            .bind(profile.collection.as_str())
            .bind(&profile.email)
            .bind(&profile.uid)
            .bind(&profile.full_name)
            .bind(&profile.phone)
            .bind(profile.gender.map(|g| g.to_string()))
            .bind(&profile.date_of_birth)
            .bind(&profile.location)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_email(
        &self,
        collection: ProfileCollection,
        email: &str,
    ) -> Result<Option<Profile>> {
        let query = format!(
            "SELECT {} FROM profiles WHERE collection = $1 AND email = $2",
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, ProfileDbModel>(&query)
            .bind(collection.as_str())
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::try_from).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        collection: ProfileCollection,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>> {
        let query = format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE collection = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            PROFILE_COLUMNS
        );
        let rows = sqlx::query_as::<_, ProfileDbModel>(&query)
            .bind(collection.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    async fn count(&self, collection: ProfileCollection) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE collection = $1")
            .bind(collection.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(
        &self,
        collection: ProfileCollection,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>> {
        let query = format!(
            r#"
            UPDATE profiles
            SET uid = COALESCE($3, uid),
                full_name = COALESCE($4, full_name),
                phone = COALESCE($5, phone),
                gender = COALESCE($6, gender),
                date_of_birth = COALESCE($7, date_of_birth),
                location = COALESCE($8, location),
                updated_at = NOW()
            WHERE collection = $1 AND email = $2
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, ProfileDbModel>(&query)
            .bind(collection.as_str())
            .bind(email)
            .bind(&patch.uid)
            .bind(&patch.full_name)
            .bind(&patch.phone)
            .bind(patch.gender.map(|g| g.to_string()))
            .bind(&patch.date_of_birth)
            .bind(&patch.location)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::try_from).transpose()
    }

    #[tracing::instrument(skip(self, patch))]
    async fn upsert_merge(
        &self,
        collection: ProfileCollection,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Profile> {
        let query = format!(
            r#"
            INSERT INTO profiles (collection, email, uid, full_name, phone, gender, date_of_birth, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (collection, email) DO UPDATE
            SET uid = COALESCE(EXCLUDED.uid, profiles.uid),
                full_name = COALESCE(EXCLUDED.full_name, profiles.full_name),
                phone = COALESCE(EXCLUDED.phone, profiles.phone),
                gender = COALESCE(EXCLUDED.gender, profiles.gender),
                date_of_birth = COALESCE(EXCLUDED.date_of_birth, profiles.date_of_birth),
                location = COALESCE(EXCLUDED.location, profiles.location),
                updated_at = NOW()
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, ProfileDbModel>(&query)
            .bind(collection.as_str())
            .bind(email)
            .bind(&patch.uid)
            .bind(&patch.full_name)
            .bind(&patch.phone)
            .bind(patch.gender.map(|g| g.to_string()))
            .bind(&patch.date_of_birth)
            .bind(&patch.location)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }
}
