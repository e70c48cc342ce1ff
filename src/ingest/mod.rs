//! Ingestion pipeline
//!
//! Pulls the complete external dataset page by page, commits it in a single
//! bulk insert and retries whole attempts under a [`RetryPolicy`].

mod indexer;
mod pipeline;
mod retry;

pub use indexer::{Indexer, NoopIndexer};
pub use pipeline::{IngestionPipeline, LoadReport, PipelineConfig};
pub use retry::RetryPolicy;
