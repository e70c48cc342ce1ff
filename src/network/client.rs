//! HTTP client for talking to the external user source

use crate::config::SourceSettings;
use crate::error::IngestionError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Raw response from the source
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub text: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper with catalog-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, IngestionError> {
        Self::with_settings(&SourceSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &SourceSettings) -> Result<Self, IngestionError> {
        let timeout = Duration::from_secs_f64(settings.request_timeout);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("user-catalog/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// GET request with query parameters
    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<HttpResponse, IngestionError> {
        debug!(url, ?params, "GET");

        let response = self
            .client
            .get(url)
            .timeout(self.default_timeout)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(HttpResponse { status, text })
    }
}
