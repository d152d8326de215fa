use crate::infrastructure::state::AppState;
use crate::presentation::admin::handlers::profiles;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(profiles::get_own_profile).put(profiles::save_own_profile),
        )
        .route("/profiles/{email}", get(profiles::get_admin_profile))
        .route("/users", get(profiles::list_users))
}
