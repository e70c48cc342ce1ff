//! Application state shared across handlers

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::error::CatalogError;
use crate::ingest::{IngestionPipeline, LoadReport};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Read-side catalog
    pub catalog: Catalog,
    /// Ingestion pipeline
    pub pipeline: Arc<IngestionPipeline>,
    /// Serializes load calls
    load_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, catalog: Catalog, pipeline: IngestionPipeline) -> Self {
        Self {
            settings: Arc::new(settings),
            catalog,
            pipeline: Arc::new(pipeline),
            load_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run the ingestion pipeline, one call at a time
    pub async fn load(&self) -> Result<LoadReport, CatalogError> {
        let _guard = self.load_lock.lock().await;
        Ok(self.pipeline.load().await?)
    }
}
