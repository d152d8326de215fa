use crate::domain::assistant::MAX_IMAGE_BYTES;
use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::assistant;
use crate::presentation::middleware::rate_limit::rate_limit_layer;
use axum::{Router, extract::DefaultBodyLimit, routing::post};

/// Room for a 5 MiB image after base64 expansion plus the form fields
pub const ASSISTANT_BODY_LIMIT: usize = MAX_IMAGE_BYTES * 4 / 3 + 64 * 1024;

pub fn routes() -> anyhow::Result<Router<AppState>> {
    Ok(Router::new()
        .route("/disaster-info", post(assistant::disaster_info))
        .route("/earthquake-info", post(assistant::earthquake_info))
        .route("/safety-tips", post(assistant::safety_tips))
        .route("/severity", post(assistant::assess_severity))
        .route("/severity/upload", post(assistant::assess_severity_upload))
        .route("/chat", post(assistant::chat))
        .route("/resources", post(assistant::locate_resources))
        .layer(DefaultBodyLimit::max(ASSISTANT_BODY_LIMIT))
        .layer(rate_limit_layer()?))
}
