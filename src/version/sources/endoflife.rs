//! endoflife.date API implementation

use std::time::Duration;

use tracing::warn;

use crate::config::FETCH_TIMEOUT_MS;
use crate::version::error::SourceError;
use crate::version::source::EolSource;
use crate::version::types::EndOfLifeEntry;

/// Default base URL for endoflife.date
pub const DEFAULT_BASE_URL: &str = "https://endoflife.date";

/// Source implementation for the endoflife.date product API
pub struct EndOfLifeDateSource {
    client: reqwest::Client,
    base_url: String,
}

impl EndOfLifeDateSource {
    /// Creates a new EndOfLifeDateSource with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("keepup")
                .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for EndOfLifeDateSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl EolSource for EndOfLifeDateSource {
    async fn fetch_cycles(&self, package_name: &str) -> Result<Vec<EndOfLifeEntry>, SourceError> {
        let url = format!("{}/api/{}.json", self.base_url, package_name);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("endoflife.date returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse endoflife.date response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })
    }
}
