use std::net::SocketAddr;

use anyhow::Context;
use ebanx_payloads::api::{self, AppState};
use ebanx_payloads::config::Config;
use ebanx_payloads::EbanxGateway;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting EBANX payload service");
    tracing::info!("Environment: {}", config.server.environment);
    tracing::info!("EBANX test mode: {}", config.ebanx.test_mode);

    let gateway = EbanxGateway::new(config.ebanx.clone()).context("Failed to build EBANX gateway")?;
    let app = api::router(AppState::new(gateway, config.server.environment.as_str()));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
