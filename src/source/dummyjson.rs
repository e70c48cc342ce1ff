//! DummyJSON-style HTTP user source
//!
//! Pages are served from `GET {base_url}/users?limit=N&skip=M` as
//! `{ "users": [...], "total": T, "skip": M, "limit": N }`.

use super::traits::{SourcePage, UserSource};
use crate::config::SourceSettings;
use crate::error::IngestionError;
use crate::network::HttpClient;
use async_trait::async_trait;
use url::Url;

/// HTTP-backed user source
pub struct HttpUserSource {
    client: HttpClient,
    users_url: String,
}

impl HttpUserSource {
    /// Create a source rooted at `base_url`
    pub fn new(client: HttpClient, base_url: &str) -> Result<Self, IngestionError> {
        let base = Url::parse(base_url).map_err(|e| {
            IngestionError::config(format!("invalid source URL {}: {}", base_url, e))
        })?;

        Ok(Self {
            client,
            users_url: format!("{}/users", base.as_str().trim_end_matches('/')),
        })
    }

    /// Create a source from settings
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, IngestionError> {
        Self::new(HttpClient::with_settings(settings)?, &settings.base_url)
    }

    pub fn users_url(&self) -> &str {
        &self.users_url
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    fn name(&self) -> &str {
        "dummyjson"
    }

    async fn fetch_page(&self, limit: u32, skip: u32) -> Result<SourcePage, IngestionError> {
        let params = [("limit", limit.to_string()), ("skip", skip.to_string())];
        let response = self.client.get_with_params(&self.users_url, &params).await?;

        if !response.is_success() {
            return Err(IngestionError::Status(response.status));
        }

        let page: SourcePage = serde_json::from_str(&response.text)?;
        if page.users.is_none() {
            return Err(IngestionError::invalid_response(format!(
                "no users list at skip={}",
                skip
            )));
        }

        Ok(page)
    }
}
