use crate::domain::events::{Coordinates, DisasterEvent, EventRepository, NewDisasterEvent};
use crate::shared::error::AppError;
use crate::shared::validation::validate_not_blank;
use serde::Deserialize;
use std::sync::Arc;
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(rename = "type")]
    #[validate(
        length(max = 64, message = "Event type is too long"),
        custom(function = "validate_not_blank", message = "Event type is required")
    )]
    #[schema(example = "earthquake")]
    pub kind: String,

    #[validate(range(min = 0.0, max = 10.0, message = "Magnitude must be between 0 and 10"))]
    #[schema(example = 5.2)]
    pub magnitude: f64,

    #[validate(
        length(max = 255, message = "Place is too long"),
        custom(function = "validate_not_blank", message = "Place is required")
    )]
    #[schema(example = "Near Bago, Myanmar")]
    pub place: String,

    /// Unix milliseconds; defaults to now
    pub time: Option<i64>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,

    /// Kilometres; defaults to 0
    #[validate(range(min = 0.0, message = "Depth must not be negative"))]
    pub depth: Option<f64>,
}

pub struct CreateEventUseCase {
    repo: Arc<dyn EventRepository>,
}

impl CreateEventUseCase {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req), fields(kind = %req.kind))]
    pub async fn execute(&self, req: CreateEventRequest) -> Result<DisasterEvent, AppError> {
        let time = req.time.unwrap_or_else(|| {
            (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
        });

        let event = self
            .repo
            .create(NewDisasterEvent {
                kind: req.kind.trim().to_lowercase(),
                magnitude: req.magnitude,
                place: req.place.trim().to_string(),
                time,
                coordinates: Coordinates {
                    latitude: req.latitude,
                    longitude: req.longitude,
                },
                depth: req.depth.unwrap_or(0.0),
            })
            .await?;

        tracing::info!(id = %event.id, "event recorded");
        Ok(event)
    }
}
