//! User Catalog server
//!
//! This is the main entry point for the application.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use user_catalog::{
    config,
    ingest::{IngestionPipeline, PipelineConfig},
    source::HttpUserSource,
    web::{create_router, AppState},
    Catalog, MemoryStore, UserStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting User Catalog v{}", user_catalog::VERSION);

    // Load configuration
    let settings = config::load()?;
    info!("Using user source at {}", settings.source.base_url);

    // Build store, catalog and ingestion pipeline
    let store: Arc<dyn UserStore> = Arc::new(MemoryStore::new());
    let catalog = Catalog::new(store.clone());
    let source = HttpUserSource::from_settings(&settings.source)?;
    let pipeline = IngestionPipeline::with_config(
        Arc::new(source),
        store,
        PipelineConfig::from_settings(&settings),
    );

    let state = AppState::new(settings.clone(), catalog, pipeline);
    info!("Application state initialized");

    // Initial data load; a failure leaves the catalog empty for a later retrigger
    if settings.server.load_on_startup {
        match state.load().await {
            Ok(report) => info!(loaded = report.loaded_count, "Initial data load finished"),
            Err(e) => warn!(
                error = %e.message_chain(),
                "Failed to load initial data. Data can be loaded via /api/data/load"
            ),
        }
    }

    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
