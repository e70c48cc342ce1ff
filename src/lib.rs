//! User Catalog: a local catalog of user profiles
//!
//! Users are bulk-loaded from a paginated external source and answered from
//! memory through free-form search and exact lookups.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ingest;
pub mod network;
pub mod query;
pub mod search;
pub mod source;
pub mod web;

pub use catalog::{Catalog, MemoryStore, User, UserStore};
pub use config::Settings;
pub use error::{CatalogError, IngestionError, StoreError};
pub use ingest::{IngestionPipeline, LoadReport, RetryPolicy};
pub use query::QueryPlan;
pub use search::{Predicate, Search};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of users requested per source page
pub const DEFAULT_PAGE_SIZE: u32 = 30;
