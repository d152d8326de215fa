use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default map center (Yangon, Myanmar)
pub const DEFAULT_MAP_CENTER: MapPosition = MapPosition {
    lat: 16.8409,
    lng: 96.1735,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DisasterEvent {
    pub id: String,
    /// e.g. "earthquake", "flood", "cyclone"
    #[serde(rename = "type")]
    pub kind: String,
    /// Richter magnitude for earthquakes; a comparable severity scale otherwise
    pub magnitude: f64,
    pub place: String,
    /// Unix timestamp in milliseconds
    pub time: i64,
    pub coordinates: Coordinates,
    /// Depth in km; only meaningful for earthquakes
    pub depth: f64,
}

impl DisasterEvent {
    pub fn is_earthquake(&self) -> bool {
        self.kind.eq_ignore_ascii_case("earthquake")
    }

    /// One-line summary used by map markers and prompt context
    pub fn title(&self) -> String {
        format!("M {} - {} ({})", self.magnitude, self.place, self.kind)
    }
}

#[derive(Debug, Clone)]
pub struct NewDisasterEvent {
    pub kind: String,
    pub magnitude: f64,
    pub place: String,
    pub time: i64,
    pub coordinates: Coordinates,
    pub depth: f64,
}

/// Filters for listing events. All bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub kind: Option<String>,
    pub min_magnitude: Option<f64>,
    /// Only events at or after this unix-ms timestamp
    pub since: Option<i64>,
}

impl EventFilter {
    pub fn matches(&self, event: &DisasterEvent) -> bool {
        self.kind
            .as_ref()
            .is_none_or(|kind| event.kind.eq_ignore_ascii_case(kind))
            && self.min_magnitude.is_none_or(|min| event.magnitude >= min)
            && self.since.is_none_or(|since| event.time >= since)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapPosition {
    pub lat: f64,
    pub lng: f64,
}

/// Rendering hints for one event on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapMarker {
    pub id: String,
    pub position: MapPosition,
    pub title: String,
    pub magnitude: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    /// Diameter in pixels
    #[serde(rename = "size")]
    pub size_px: f64,
    pub label: String,
}

impl From<&DisasterEvent> for MapMarker {
    fn from(event: &DisasterEvent) -> Self {
        let label = if event.is_earthquake() {
            format!("{:.1}", event.magnitude)
        } else {
            event
                .kind
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default()
        };

        Self {
            id: event.id.clone(),
            position: MapPosition {
                lat: event.coordinates.latitude,
                lng: event.coordinates.longitude,
            },
            title: event.title(),
            magnitude: event.magnitude,
            kind: event.kind.clone(),
            color: marker_color(event.magnitude).to_string(),
            size_px: 10.0 + event.magnitude * 2.0,
            label,
        }
    }
}

/// Green below 4, amber below 6, red otherwise
pub fn marker_color(magnitude: f64) -> &'static str {
    if magnitude < 4.0 {
        "#4CAF50"
    } else if magnitude < 6.0 {
        "#FFC107"
    } else {
        "#F44336"
    }
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: NewDisasterEvent) -> Result<DisasterEvent, anyhow::Error>;

    async fn find_by_id(&self, id: &str) -> Result<Option<DisasterEvent>, anyhow::Error>;

    /// Newest first
    async fn find_recent(
        &self,
        filter: &EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DisasterEvent>, anyhow::Error>;

    async fn count(&self, filter: &EventFilter) -> Result<i64, anyhow::Error>;
}
