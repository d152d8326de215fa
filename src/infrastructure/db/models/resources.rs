use crate::domain::events::Coordinates;
use crate::domain::resources::{Resource, ResourceKind};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ResourceDbModel {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub address: String,
    pub contact: Option<String>,
    pub operating_hours: Option<String>,
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TryFrom<ResourceDbModel> for Resource {
    type Error = anyhow::Error;

    fn try_from(model: ResourceDbModel) -> Result<Self, Self::Error> {
        let kind: ResourceKind = model.kind.parse().map_err(anyhow::Error::msg)?;
        let coordinates = match (model.latitude, model.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Ok(Self {
            id: model.id,
            name: model.name,
            kind,
            address: model.address,
            contact: model.contact,
            operating_hours: model.operating_hours,
            notes: model.notes,
            coordinates,
        })
    }
}
