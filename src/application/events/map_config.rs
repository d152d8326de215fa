use crate::domain::events::{DEFAULT_MAP_CENTER, MapPosition};
use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_ZOOM: u8 = 5;

/// What a map client needs to render: tile key and initial viewport
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// `null` when no key is configured; clients should show a notice
    /// instead of the map
    pub api_key: Option<String>,
    pub center: MapPosition,
    pub zoom: u8,
}

pub fn map_config(api_key: Option<String>) -> MapConfig {
    if api_key.is_none() {
        tracing::debug!("map config requested without GOOGLE_MAPS_API_KEY");
    }
    MapConfig {
        api_key,
        center: DEFAULT_MAP_CENTER,
        zoom: DEFAULT_ZOOM,
    }
}
