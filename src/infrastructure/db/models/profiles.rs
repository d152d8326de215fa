use crate::domain::profiles::{Gender, Profile, ProfileCollection};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileDbModel {
    pub id: Uuid,
    pub collection: String,
    pub email: String,
    pub uid: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<ProfileDbModel> for Profile {
    type Error = anyhow::Error;

    fn try_from(model: ProfileDbModel) -> Result<Self, Self::Error> {
        let collection: ProfileCollection = model.collection.parse().map_err(anyhow::Error::msg)?;
        let gender = model
            .gender
            .map(|g| g.parse::<Gender>())
            .transpose()
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            id: model.id,
            collection,
            email: model.email,
            uid: model.uid,
            full_name: model.full_name,
            phone: model.phone,
            gender,
            date_of_birth: model.date_of_birth,
            location: model.location,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
