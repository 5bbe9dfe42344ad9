//! Spoonacular `findByIngredients` client.
//!
//! The only real [`RecipeSearch`] implementation: a thin reqwest client
//! around `GET /recipes/findByIngredients`. Response entries are kept as
//! raw JSON values; shape tolerance is the result normalizer's job, not
//! the transport's.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::RecipeSearch;
use crate::telemetry;
use crate::{ForageError, Result};

/// Default base URL for the Spoonacular API.
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Default per-attempt request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the Spoonacular client.
///
/// ```rust
/// # use forage::SpoonacularConfig;
/// let config = SpoonacularConfig::new("api-key")
///     .base_url("http://localhost:8080");
/// ```
#[derive(Debug, Clone)]
pub struct SpoonacularConfig {
    /// API key sent as the `apiKey` query parameter.
    pub api_key: String,
    /// Base URL, overridable for tests. Default: the public API.
    pub base_url: String,
    /// Per-attempt request timeout. Default: 5s.
    pub timeout: Duration,
}

impl SpoonacularConfig {
    /// Create a config with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the base URL (no trailing slash).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the Spoonacular recipe-search API.
pub struct SpoonacularClient {
    http: reqwest::Client,
    config: SpoonacularConfig,
}

impl SpoonacularClient {
    /// Build a client from the given configuration.
    pub fn new(config: SpoonacularConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ForageError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl RecipeSearch for SpoonacularClient {
    fn name(&self) -> &str {
        "spoonacular"
    }

    async fn search(&self, ingredients: &str, count: u32) -> Result<Vec<Value>> {
        let url = format!("{}/recipes/findByIngredients", self.config.base_url);
        debug!(ingredients, count, "searching recipes");

        let result = self.request(&url, ingredients, count).await;
        metrics::counter!(telemetry::SEARCH_REQUESTS_TOTAL,
            "operation" => "search",
            "status" => if result.is_ok() { "ok" } else { "error" },
        )
        .increment(1);
        result
    }
}

impl SpoonacularClient {
    async fn request(&self, url: &str, ingredients: &str, count: u32) -> Result<Vec<Value>> {
        let response = self
            .http
            .get(url)
            .query(&[
                ("ingredients", ingredients),
                ("number", &count.to_string()),
                ("apiKey", &self.config.api_key),
            ])
            .send()
            .await
            .map_err(|e| ForageError::Http(e.to_string()))?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::PAYMENT_REQUIRED | StatusCode::FORBIDDEN => {
                return Err(ForageError::AuthenticationFailed);
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                return Err(ForageError::RateLimited { retry_after });
            }
            _ if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(ForageError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForageError::Http(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
