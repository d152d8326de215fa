use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::middleware::cors::cors_layer;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{admin, client};
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn app(state: AppState) -> anyhow::Result<Router> {
    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", client::routes::routes()?)
        .nest("/api/v1/admin", admin::routes::routes(state.clone()))
        .layer(cors_layer()?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
