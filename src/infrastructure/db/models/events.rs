use crate::domain::events::{Coordinates, DisasterEvent};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct DisasterEventDbModel {
    pub id: String,
    pub kind: String,
    pub magnitude: f64,
    pub place: String,
    pub occurred_at: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
}

impl From<DisasterEventDbModel> for DisasterEvent {
    fn from(model: DisasterEventDbModel) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            magnitude: model.magnitude,
            place: model.place,
            time: model.occurred_at,
            coordinates: Coordinates {
                latitude: model.latitude,
                longitude: model.longitude,
            },
            depth: model.depth,
        }
    }
}
