use crate::infrastructure::state::AppState;
use crate::presentation::admin::handlers::roles;
use axum::{Router, routing::post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/set-admin", post(roles::set_admin))
        .route("/remove-admin", post(roles::remove_admin))
}
