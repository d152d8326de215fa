pub mod profiles;
pub mod roles;

use crate::infrastructure::state::AppState;
use crate::presentation::admin::handlers::events;
use crate::presentation::middleware::auth::require_admin;
use axum::{Router, middleware, routing::post};

/// Everything under `/admin` requires an admin access token
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/roles", roles::routes())
        .merge(profiles::routes())
        .route("/events", post(events::create_event))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
