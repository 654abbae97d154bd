use std::error::Error;

use emission_engine::api::{AppState, create_router};
use emission_engine::config::ConfigLoader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "0.0.0.0:5000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("EMISSION_CONFIG_DIR") {
        Ok(dir) => {
            tracing::info!(config_dir = %dir, "Loading emission factors");
            ConfigLoader::load(&dir)?
        }
        Err(_) => {
            tracing::info!("EMISSION_CONFIG_DIR not set, using built-in emission factors");
            ConfigLoader::builtin()
        }
    };

    let app = create_router(AppState::new(config));

    let addr = std::env::var("EMISSION_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
