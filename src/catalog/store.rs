//! Record store for catalog users

use super::user::User;
use crate::error::StoreError;
use crate::search::{Normalizer, Predicate};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;

/// Queryable collection of users.
///
/// Implementations must return query results ordered by identifier
/// ascending and must apply `insert_all` atomically.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Number of stored users
    async fn count(&self) -> Result<usize, StoreError>;

    /// All users matching a predicate, ordered by id
    async fn find(&self, predicate: &Predicate) -> Result<Vec<User>, StoreError>;

    /// Insert a batch; either every user is stored or none is
    async fn insert_all(&self, users: &[User]) -> Result<usize, StoreError>;
}

/// In-memory store keyed by identifier
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<BTreeMap<i64, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(existing: &BTreeMap<i64, User>, batch: &[User]) -> Result<(), StoreError> {
        let normalizer = Normalizer::ssn();
        let mut ids: HashSet<i64> = existing.keys().copied().collect();
        let mut ssns: HashSet<String> = existing
            .values()
            .map(|u| normalizer.apply(&u.ssn).into_owned())
            .collect();
        let mut emails: HashSet<String> =
            existing.values().map(|u| u.email.to_lowercase()).collect();

        for user in batch {
            let required = [
                ("firstName", &user.first_name),
                ("lastName", &user.last_name),
                ("ssn", &user.ssn),
                ("email", &user.email),
                ("role", &user.role),
            ];
            if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
                return Err(StoreError::invalid(format!(
                    "user {} is missing {}",
                    user.id, name
                )));
            }

            if !ids.insert(user.id) {
                return Err(StoreError::duplicate("id", user.id.to_string()));
            }
            if !ssns.insert(normalizer.apply(&user.ssn).into_owned()) {
                return Err(StoreError::duplicate("ssn", user.ssn.clone()));
            }
            if !emails.insert(user.email.to_lowercase()) {
                return Err(StoreError::duplicate("email", user.email.clone()));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.users.read().await.len())
    }

    async fn find(&self, predicate: &Predicate) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|user| predicate.matches(user))
            .cloned()
            .collect())
    }

    async fn insert_all(&self, batch: &[User]) -> Result<usize, StoreError> {
        let mut users = self.users.write().await;
        Self::validate(&users, batch)?;

        users.extend(batch.iter().map(|user| (user.id, user.clone())));
        Ok(batch.len())
    }
}
