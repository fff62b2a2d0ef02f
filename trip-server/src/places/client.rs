//! Open-Meteo geocoding API client.

use serde::{Deserialize, Serialize};

/// Default base URL for the geocoding API (no key required).
const DEFAULT_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1";

#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoding API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse geocoding response: {message}")]
    Json { message: String },
}

/// Wrapper for the geocoding response. `results` is absent entirely when
/// nothing matches.
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<PlaceDto>>,
}

/// Minimal DTO for a place - name and enough context to disambiguate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDto {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct PlaceClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of suggestions per query
    pub max_results: u8,
}

impl Default for PlaceClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_results: 5,
        }
    }
}

impl PlaceClientConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the Open-Meteo geocoding API.
#[derive(Debug, Clone)]
pub struct PlaceClient {
    http: reqwest::Client,
    base_url: String,
    max_results: u8,
}

impl PlaceClient {
    pub fn new(config: PlaceClientConfig) -> Result<Self, PlaceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_results: config.max_results,
        })
    }

    /// Search for places matching a free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceDto>, PlaceError> {
        let url = format!("{}/search", self.base_url);
        let count = self.max_results.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlaceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let response: GeocodingResponse =
            serde_json::from_str(&body).map_err(|e| PlaceError::Json {
                message: e.to_string(),
            })?;

        Ok(response.results.unwrap_or_default())
    }
}
