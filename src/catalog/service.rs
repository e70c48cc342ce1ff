//! Catalog lookups and search

use super::store::UserStore;
use super::user::User;
use crate::error::CatalogError;
use crate::search::{Field, Predicate, Search, Value};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Snapshot of how much data the catalog holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatus {
    pub total_users: usize,
    pub data_loaded: bool,
}

/// Read-side facade over the record store
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn UserStore>,
    search: Search,
}

impl Catalog {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        let search = Search::new(store.clone());
        Self { store, search }
    }

    /// Every user, ordered by id
    pub async fn list_all(&self) -> Result<Vec<User>, CatalogError> {
        debug!("Fetching all users");
        Ok(self.store.find(&Predicate::All).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, CatalogError> {
        debug!(id, "Fetching user by id");
        self.first(Predicate::equals(Field::Id, Value::Int(id)))
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("User not found with id: {}", id)))
    }

    /// Exact email lookup, ignoring case
    pub async fn get_by_email(&self, email: &str) -> Result<User, CatalogError> {
        debug!(email, "Fetching user by email");
        self.first(Predicate::equals_ci(Field::Email, email))
            .await?
            .ok_or_else(|| {
                CatalogError::not_found(format!("User not found with email: {}", email))
            })
    }

    /// Free-form search; a missing or blank term lists everything
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<User>, CatalogError> {
        Ok(self.search.search(term.unwrap_or_default()).await?)
    }

    pub async fn count(&self) -> Result<usize, CatalogError> {
        Ok(self.store.count().await?)
    }

    pub async fn status(&self) -> Result<CatalogStatus, CatalogError> {
        let total_users = self.count().await?;
        Ok(CatalogStatus {
            total_users,
            data_loaded: total_users > 0,
        })
    }

    async fn first(&self, predicate: Predicate) -> Result<Option<User>, CatalogError> {
        Ok(self.store.find(&predicate).await?.into_iter().next())
    }
}
