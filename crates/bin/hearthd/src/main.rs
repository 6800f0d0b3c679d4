//! # hearthd — hearth daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct store implementations (adapters)
//! - Construct application services, injecting stores via the storage port
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use hearth_adapter_http_axum::router;
use hearth_adapter_http_axum::state::AppState;
use hearth_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteDeviceStore, SqliteDwellingStore, SqliteHubStore,
};
use hearth_app::services::device_service::DeviceService;
use hearth_app::services::dwelling_service::DwellingService;
use hearth_app::services::hub_service::HubService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Services, each with its own store handles onto the shared pool
    let device_service = DeviceService::new(SqliteDeviceStore::new(pool.clone()));
    let hub_service = HubService::new(
        SqliteHubStore::new(pool.clone()),
        SqliteDeviceStore::new(pool.clone()),
    );
    let dwelling_service = DwellingService::new(
        SqliteDwellingStore::new(pool.clone()),
        SqliteHubStore::new(pool),
    );

    // HTTP
    let state = AppState::new(device_service, hub_service, dwelling_service);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "hearthd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
