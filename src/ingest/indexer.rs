//! Post-commit indexing hook

use crate::catalog::User;
use crate::error::IngestionError;
use async_trait::async_trait;

/// Invoked after a successful bulk commit.
///
/// Search evaluates predicates over live records, so the default hook does
/// nothing. A dedicated index can be plugged in here without touching the
/// pipeline.
#[async_trait]
pub trait Indexer: Send + Sync {
    async fn index_all(&self, users: &[User]) -> Result<(), IngestionError>;
}

/// Indexer that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndexer;

#[async_trait]
impl Indexer for NoopIndexer {
    async fn index_all(&self, _users: &[User]) -> Result<(), IngestionError> {
        Ok(())
    }
}
