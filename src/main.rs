use disaster_aid::infrastructure::auth::JwtAuthService;
use disaster_aid::infrastructure::completion::GeminiClient;
use disaster_aid::infrastructure::config::AppConfig;
use disaster_aid::infrastructure::identity::build_provider;
use disaster_aid::infrastructure::state::AppState;
use disaster_aid::infrastructure;
use disaster_aid::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_with_signal().await
}

async fn run_with_signal() -> anyhow::Result<()> {
    run(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run<F>(shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();

    // Tests may call this more than once
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "disaster_aid=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    let (listener, app) = bootstrap(&config).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn bootstrap(config: &AppConfig) -> anyhow::Result<(tokio::net::TcpListener, axum::Router)> {
    let pool = infrastructure::db::create_pool(&config.database_url).await?;

    sqlx::migrate!().run(&pool).await?;

    let auth_service = Arc::new(JwtAuthService::new(
        &config.jwt.private_key_path,
        &config.jwt.public_key_path,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    )?);
    let identity = build_provider(config)?;
    let completion = Arc::new(GeminiClient::new(&config.gemini));

    let state = AppState::new(pool, auth_service, identity, completion)
        .with_maps_api_key(config.maps_api_key.clone());

    let purged = state.repos.sessions.delete_expired().await?;
    if purged > 0 {
        tracing::info!(purged, "removed expired sessions");
    }

    let app = presentation::router::app(state)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    Ok((listener, app))
}
