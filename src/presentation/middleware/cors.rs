use axum::http::HeaderValue;
use std::env;
use tower_http::cors::{Any, CorsLayer};

/// CORS for the browser front end. `CORS_ALLOWED_ORIGINS` is a comma
/// separated list; unset or `*` allows any origin.
pub fn cors_layer() -> anyhow::Result<CorsLayer> {
    let allowed_origins = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    origins_layer(&allowed_origins)
}

fn origins_layer(allowed_origins: &str) -> anyhow::Result<CorsLayer> {
    let allowed_origins = allowed_origins.trim();
    if allowed_origins.is_empty() || allowed_origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(|s| s.trim().parse())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
