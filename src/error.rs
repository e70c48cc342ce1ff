//! Error types for the user catalog
//!
//! Lookups fail with [`CatalogError::NotFound`], ingestion failures surface as
//! [`IngestionError`] after the retry policy gives up, and the record store
//! rejects batches that break its constraints with [`StoreError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique field collides with an existing or batched record.
    #[error("Duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    /// A record is missing required data.
    #[error("Invalid record: {0}")]
    Invalid(String),

    /// The backing storage could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create a duplicate-key error.
    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid-record error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Create a storage-unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Whether the error rejects the data itself rather than the storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Duplicate { .. } | Self::Invalid(_))
    }
}

/// Coarse classification of ingestion failures, used by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionErrorKind {
    Network,
    Status,
    InvalidResponse,
    Decode,
    Validation,
    Storage,
    Config,
    Exhausted,
}

/// Errors that can occur while loading users from the external source.
#[derive(Error, Debug)]
pub enum IngestionError {
    /// Transport failure talking to the source.
    #[error("Network error: {0}")]
    Network(String),

    /// The source answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The page body parsed but lacks the record list.
    #[error("Invalid response from external API: {0}")]
    InvalidResponse(String),

    /// The page body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The store rejected the batch or could not be reached.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The source is misconfigured.
    #[error("Invalid source configuration: {0}")]
    Config(String),

    /// Every attempt allowed by the retry policy failed.
    #[error("Failed to load users from external API after {attempts} attempt(s)")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<IngestionError>,
    },
}

impl IngestionError {
    /// Create a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid-response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> IngestionErrorKind {
        match self {
            Self::Network(_) => IngestionErrorKind::Network,
            Self::Status(_) => IngestionErrorKind::Status,
            Self::InvalidResponse(_) => IngestionErrorKind::InvalidResponse,
            Self::Decode(_) => IngestionErrorKind::Decode,
            Self::Store(e) if e.is_validation() => IngestionErrorKind::Validation,
            Self::Store(_) => IngestionErrorKind::Storage,
            Self::Config(_) => IngestionErrorKind::Config,
            Self::Exhausted { .. } => IngestionErrorKind::Exhausted,
        }
    }

    /// Render the error together with its source chain, outermost first.
    pub fn message_chain(&self) -> String {
        use std::error::Error as _;

        let mut parts = vec![self.to_string()];
        let mut current = self.source();
        while let Some(err) = current {
            parts.push(err.to_string());
            current = err.source();
        }
        parts.join(": ")
    }
}

impl From<reqwest::Error> for IngestionError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None if err.is_decode() => Self::Decode(err.to_string()),
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for IngestionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors surfaced by the catalog facade.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No record matched an identifier or email lookup.
    #[error("{0}")]
    NotFound(String),

    /// A load request failed after the retry policy gave up.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Create a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Render the error with its full cause chain.
    pub fn message_chain(&self) -> String {
        match self {
            Self::Ingestion(e) => e.message_chain(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_chain_includes_cause() {
        let err = IngestionError::Exhausted {
            attempts: 3,
            source: Box::new(IngestionError::invalid_response("users list missing")),
        };
        let chain = err.message_chain();
        assert!(chain.starts_with("Failed to load users from external API after 3 attempt(s)"));
        assert!(chain.ends_with("users list missing"));
    }

    #[test]
    fn test_store_errors_are_validation_kind() {
        let err: IngestionError = StoreError::duplicate("email", "a@b.c").into();
        assert_eq!(err.kind(), IngestionErrorKind::Validation);
    }

    #[test]
    fn test_store_read_failures_are_storage_kind() {
        let err: IngestionError = StoreError::unavailable("connection refused").into();
        assert_eq!(err.kind(), IngestionErrorKind::Storage);
    }

    #[test]
    fn test_config_kind() {
        assert_eq!(
            IngestionError::config("bad url").kind(),
            IngestionErrorKind::Config
        );
    }

    #[test]
    fn test_catalog_message_chain_keeps_ingestion_cause() {
        let err = CatalogError::from(IngestionError::Exhausted {
            attempts: 2,
            source: Box::new(IngestionError::Status(503)),
        });
        assert_eq!(
            err.message_chain(),
            "Failed to load users from external API after 2 attempt(s): Unexpected HTTP status 503"
        );
    }
}
