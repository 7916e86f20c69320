use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::config::ServerConfig;
use api::state::AppState;

const RATE_LIMIT_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    info!("Starting rock-paper-scissors server with {:?}", config);

    let state = AppState::new(&config);

    if state.rate_limiter.is_enabled() {
        let rate_limiter = state.rate_limiter.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(RATE_LIMIT_PURGE_INTERVAL);
            loop {
                ticker.tick().await;
                rate_limiter.purge_expired(Instant::now());
            }
        });
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        api::app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
