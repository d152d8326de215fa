use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::profile;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(profile::get_profile).put(profile::save_profile))
}
