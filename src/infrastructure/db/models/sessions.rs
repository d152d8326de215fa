use crate::domain::auth::{Role, Session};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct SessionDbModel {
    pub id: Uuid,
    pub uid: String,
    pub email: String,
    pub role: String,
    pub token_hash: String,
    pub provider_refresh_token: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl TryFrom<SessionDbModel> for Session {
    type Error = anyhow::Error;

    fn try_from(model: SessionDbModel) -> Result<Self, Self::Error> {
        let role: Role = model.role.parse().map_err(anyhow::Error::msg)?;
        Ok(Self {
            id: model.id,
            uid: model.uid,
            email: model.email,
            role,
            token_hash: model.token_hash,
            provider_refresh_token: model.provider_refresh_token,
            expires_at: model.expires_at,
            created_at: model.created_at,
        })
    }
}
