use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use vitis_core::Vitis;

mod config;
mod routes;

use config::ServerConfig;
use routes::{AppState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let vitis = Vitis::new(config.vitis())?;

    let app = router(Arc::new(AppState { vitis }))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, base_url = %config.base_url, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
