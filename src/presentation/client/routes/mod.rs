pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod events;
pub mod profile;

use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::{emergency, resources};
use axum::{Router, routing::get};

pub fn routes() -> anyhow::Result<Router<AppState>> {
    Ok(Router::new()
        .nest("/auth", auth::routes()?)
        .nest("/profile", profile::routes())
        .nest("/assistant", assistant::routes()?)
        .merge(events::routes())
        .nest("/alerts", alerts::routes())
        .route("/resources", get(resources::list_resources))
        .route("/emergency-contacts", get(emergency::list_contacts)))
}
