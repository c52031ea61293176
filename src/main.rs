mod config;
mod constants;
mod handlers;
mod models;
mod services;
mod utils;

use log::{info, warn};
use std::{sync::Arc, time::Duration};

use crate::config::Config;
use crate::models::App;
use crate::services::backend::HttpConversationBackend;
use crate::services::mask_token;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("👋 Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    info!("🚀 Chat-completions gateway starting...");
    info!(
        "   Backend URL: {}",
        config.backend_url.as_deref().unwrap_or("derived from request Host")
    );
    info!(
        "   API Key: {}",
        config.api_key.as_deref().map(mask_token).unwrap_or_else(|| "Not set (open access)".into())
    );
    info!("   Backend connect timeout: {}s", config.connect_timeout_secs);

    // Connect timeout only: an answer may stream for as long as the backend keeps it open
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(1024)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()?;

    let app = App::new(Arc::new(HttpConversationBackend::new(client)))
        .with_backend_url(config.backend_url.clone())
        .with_api_key(config.api_key.clone());

    let router = handlers::router(app);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("   Listening on: 0.0.0.0:{}", config.port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
