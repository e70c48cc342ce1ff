//! Bulk ingestion of users from an external source

use super::indexer::{Indexer, NoopIndexer};
use super::retry::RetryPolicy;
use crate::catalog::{User, UserStore};
use crate::config::Settings;
use crate::error::IngestionError;
use crate::source::UserSource;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Outcome of a load call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub previous_count: usize,
    pub current_count: usize,
    pub loaded_count: usize,
    /// The catalog already held data, nothing was fetched
    pub already_loaded: bool,
}

/// Configuration for the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Records requested per page
    pub page_size: u32,
    pub retry: RetryPolicy,
}

impl PipelineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            page_size: settings.source.page_size,
            retry: RetryPolicy::from_settings(&settings.ingestion.retry),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_size: crate::DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

/// Loads the full external dataset into an empty store.
///
/// Not safe for concurrent `load` calls on the same store; callers must
/// serialize them.
pub struct IngestionPipeline {
    source: Arc<dyn UserSource>,
    store: Arc<dyn UserStore>,
    indexer: Arc<dyn Indexer>,
    config: PipelineConfig,
}

impl IngestionPipeline {
    pub fn new(source: Arc<dyn UserSource>, store: Arc<dyn UserStore>) -> Self {
        Self::with_config(source, store, PipelineConfig::default())
    }

    pub fn with_config(
        source: Arc<dyn UserSource>,
        store: Arc<dyn UserStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            store,
            indexer: Arc::new(NoopIndexer),
            config,
        }
    }

    /// Replace the post-commit indexing hook
    pub fn with_indexer(mut self, indexer: Arc<dyn Indexer>) -> Self {
        self.indexer = indexer;
        self
    }

    /// Load every user from the source unless the store already has data.
    ///
    /// Each attempt re-checks the store, fetches all pages and commits them in
    /// one bulk insert; a failed attempt leaves the store untouched. The
    /// indexing hook runs once after the commit and is never retried, so its
    /// error is returned as is.
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn load(&self) -> Result<LoadReport, IngestionError> {
        info!("Starting to load users from external source");
        let previous_count = self.store.count().await?;

        let committed = self.config.retry.run(|attempt| self.attempt(attempt)).await?;
        if let Some(users) = &committed {
            self.indexer.index_all(users).await?;
        }

        let current_count = self.store.count().await?;
        Ok(LoadReport {
            previous_count,
            current_count,
            loaded_count: current_count.saturating_sub(previous_count),
            already_loaded: committed.is_none(),
        })
    }

    /// One guarded fetch-and-commit pass, returning the committed batch.
    /// `None` means the store was not empty.
    async fn attempt(&self, attempt: u32) -> Result<Option<Vec<User>>, IngestionError> {
        let existing = self.store.count().await?;
        if existing > 0 {
            info!(existing, "Users already exist, skipping data load");
            return Ok(None);
        }

        let users = self.fetch_all(attempt).await?;
        let count = self.store.insert_all(&users).await?;

        info!(count, attempt, "Successfully loaded users from external source");
        Ok(Some(users))
    }

    /// Fetch every page into memory; the first page's total bounds the loop.
    async fn fetch_all(&self, attempt: u32) -> Result<Vec<User>, IngestionError> {
        let limit = self.config.page_size.max(1);
        let mut skip = 0u32;
        let mut total: Option<u32> = None;
        let mut users: Vec<User> = Vec::new();

        loop {
            debug!(attempt, limit, skip, "Fetching users page");
            let page = self.source.fetch_page(limit, skip).await?;
            let records = page.users.ok_or_else(|| {
                IngestionError::invalid_response(format!("no users list at skip={}", skip))
            })?;

            let declared = *total.get_or_insert(page.total);
            let received = records.len();
            users.extend(records.into_iter().map(User::from));
            debug!(received, buffered = users.len(), total = declared, "Buffered page");

            skip = skip.saturating_add(limit);
            if skip >= declared {
                break;
            }
        }

        Ok(users)
    }
}
