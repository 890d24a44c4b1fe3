//! Pharmaceutical Inventory Dashboard - Backend Server
//!
//! Serves inventory rollups to the dashboard and relays CSV uploads and
//! stock alert emails.

use std::net::SocketAddr;

use pharma_inventory_backend::{create_app, services::UploadService, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pim_server=debug,pharma_inventory_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Pharmaceutical Inventory Server");
    tracing::info!("Environment: {}", config.environment);

    // Create uploads directory if it doesn't exist
    UploadService::new(&config.uploads).ensure_dir().await?;
    tracing::info!("Upload directory: {}", config.uploads.directory);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config);
    let snapshot = state.store.snapshot().await;
    tracing::info!(
        source = ?snapshot.source,
        records = snapshot.records.len(),
        products = snapshot.aggregates.len(),
        "Inventory dataset loaded"
    );

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
