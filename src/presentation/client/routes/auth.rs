use crate::infrastructure::state::AppState;
use crate::presentation::client::handlers::auth;
use crate::presentation::middleware::rate_limit::rate_limit_layer;
use axum::{
    Router,
    routing::{get, post},
};

/// Credential routes are rate limited; session routes are not
pub fn routes() -> anyhow::Result<Router<AppState>> {
    let credentials = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh_token))
        .layer(rate_limit_layer()?);

    Ok(Router::new()
        .merge(credentials)
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me)))
}
