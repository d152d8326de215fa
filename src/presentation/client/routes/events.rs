use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::events;
use axum::{Router, routing::get};

/// Event listings and the map endpoints built on them
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events))
        .route("/events/{id}", get(events::get_event))
        .route("/map/markers", get(events::list_markers))
        .route("/map/config", get(events::get_map_config))
}
