use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::alerts;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::matching_alerts))
        .route(
            "/preferences",
            get(alerts::get_preferences).put(alerts::save_preferences),
        )
}
