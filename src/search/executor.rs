//! Search execution against the record store

use super::builder::{PredicateBuilder, SearchPlan};
use crate::catalog::{User, UserStore};
use crate::error::StoreError;
use crate::query::QueryPlan;
use std::sync::Arc;
use tracing::debug;

/// Read-only search executor
#[derive(Clone)]
pub struct Search {
    store: Arc<dyn UserStore>,
}

impl Search {
    /// Create a new search executor over a store
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Classify, build and run a raw search term
    pub async fn search(&self, raw: &str) -> Result<Vec<User>, StoreError> {
        let query = QueryPlan::parse(raw);
        debug!(query = %raw, strategy = ?query.strategy, "Resolved search strategy");
        self.execute(&PredicateBuilder::build(&query)).await
    }

    /// Run plan stages in order, returning the first non-empty result.
    ///
    /// Results are ordered by identifier ascending.
    pub async fn execute(&self, plan: &SearchPlan) -> Result<Vec<User>, StoreError> {
        let mut results = Vec::new();

        for (stage, predicate) in plan.stages.iter().enumerate() {
            results = self.store.find(predicate).await?;
            if !results.is_empty() {
                debug!(stage, count = results.len(), "Search stage matched");
                break;
            }
        }

        results.sort_by_key(|u| u.id);
        Ok(results)
    }
}
