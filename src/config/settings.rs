//! Settings structures for the user catalog

use crate::error::IngestionErrorKind;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub source: SourceSettings,
    pub ingestion: IngestionSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (USER_CATALOG_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("USER_CATALOG_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("USER_CATALOG_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("USER_CATALOG_LOAD_ON_STARTUP") {
            self.server.load_on_startup = val.parse().unwrap_or(self.server.load_on_startup);
        }
        if let Some(val) = var("USER_CATALOG_SOURCE_URL") {
            self.source.base_url = val;
        }
        if let Some(val) = var("USER_CATALOG_RETRY_MAX_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                self.ingestion.retry.max_attempts = attempts;
            }
        }
        if let Some(val) = var("USER_CATALOG_RETRY_DELAY_MS") {
            if let Ok(delay) = val.parse() {
                self.ingestion.retry.delay_ms = delay;
            }
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
    /// Run one ingestion before serving
    pub load_on_startup: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            load_on_startup: true,
        }
    }
}

/// External user source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Base URL; pages are requested from `{base_url}/users`
    pub base_url: String,
    /// Records requested per page
    pub page_size: u32,
    /// Request timeout in seconds
    pub request_timeout: f64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://dummyjson.com".to_string(),
            page_size: crate::DEFAULT_PAGE_SIZE,
            request_timeout: 10.0,
        }
    }
}

/// Ingestion settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    pub retry: RetrySettings,
}

/// Retry policy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed wait between attempts in milliseconds
    pub delay_ms: u64,
    /// Error kinds that trigger another attempt
    pub retry_on: Vec<IngestionErrorKind>,
}

impl RetrySettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 1000,
            retry_on: vec![
                IngestionErrorKind::Network,
                IngestionErrorKind::Status,
                IngestionErrorKind::InvalidResponse,
                IngestionErrorKind::Decode,
            ],
        }
    }
}
