mod config;
mod errors;
mod extract;
mod fold;
mod routes;
mod sessions;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::sessions::spawn_idle_sweeper;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Paperfold API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Defaults: {} mm thick, {} cm side, locale {}, max {} sessions, idle TTL {}s",
        config.default_parameters.base_thickness_mm,
        config.default_parameters.initial_side_length_cm,
        config.locale,
        config.max_sessions,
        config.session_idle_secs
    );

    let state = AppState::new(config.clone());
    spawn_idle_sweeper(state.sessions.clone());

    // Browser pages call the API cross-origin, hence the permissive CORS layer.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
