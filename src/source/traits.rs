//! User source traits and types

use crate::catalog::SourceUser;
use crate::error::IngestionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page of users as returned by the source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePage {
    /// Records on this page; absent means the response is unusable
    #[serde(default)]
    pub users: Option<Vec<SourceUser>>,
    /// Declared size of the full dataset
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
}

impl SourcePage {
    pub fn new(users: Vec<SourceUser>, total: u32, skip: u32, limit: u32) -> Self {
        Self {
            users: Some(users),
            total,
            skip,
            limit,
        }
    }
}

/// Paginated provider of external user records
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &str;

    /// Fetch `limit` records starting at offset `skip`
    async fn fetch_page(&self, limit: u32, skip: u32) -> Result<SourcePage, IngestionError>;
}
