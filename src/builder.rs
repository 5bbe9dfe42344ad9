//! Builder for configuring [`Forage`] instances.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Fulfillment, ShardStore};
use crate::recipe::RecipeRecord;
use crate::search::{
    RecipeSearch, RetryConfig, RetryingSearch, SpoonacularClient, SpoonacularConfig,
};
use crate::{ForageError, Result};

/// Main entry point: a configured fulfillment pipeline.
///
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> forage::Result<()> {
/// let forage = forage::Forage::builder()
///     .api_key("your-spoonacular-key")
///     .build()?;
///
/// let recipes = forage.fulfill("cheese, chicken, beef", 5).await?;
/// for recipe in &recipes {
///     println!("{}", recipe.display_title());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Forage {
    fulfillment: Fulfillment,
}

impl Forage {
    /// Create a new builder for configuring a `Forage` instance.
    pub fn builder() -> ForageBuilder {
        ForageBuilder::new()
    }

    /// Fetch up to `count` recipes for the raw ingredient input, serving
    /// from the shard cache where possible.
    ///
    /// See [`Fulfillment::fulfill`] for the hit / partial-hit / miss
    /// semantics and error behavior.
    pub async fn fulfill(&self, ingredients: &str, count: u32) -> Result<Vec<RecipeRecord>> {
        self.fulfillment.fulfill(ingredients, count).await
    }

    /// The directory shards are persisted under.
    pub fn cache_dir(&self) -> &Path {
        self.fulfillment.store().dir()
    }
}

/// Builder for [`Forage`] instances.
///
/// The cache directory, API credentials and retry policy are all
/// explicit; nothing is read from ambient global state.
pub struct ForageBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    cache_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    retry: RetryConfig,
    search: Option<Arc<dyn RecipeSearch>>,
}

impl ForageBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            cache_dir: None,
            timeout: None,
            retry: RetryConfig::default(),
            search: None,
        }
    }

    /// Spoonacular API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the search API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Directory for cache shards (default: `<user cache dir>/forage`).
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Per-attempt request timeout for the search collaborator.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retry policy for transient search failures.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Substitute a custom search collaborator (used by tests; replaces
    /// the Spoonacular client, so no API key is needed).
    pub fn search(mut self, search: Arc<dyn RecipeSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Build the configured [`Forage`] instance.
    ///
    /// Fails with [`ForageError::Configuration`] when no API key is set
    /// and no custom collaborator was substituted.
    pub fn build(self) -> Result<Forage> {
        let search: Arc<dyn RecipeSearch> = match self.search {
            Some(search) => search,
            None => {
                let api_key = self.api_key.ok_or_else(|| {
                    ForageError::Configuration("an API key is required".to_string())
                })?;
                let mut config = SpoonacularConfig::new(api_key);
                if let Some(url) = self.base_url {
                    config = config.base_url(url);
                }
                if let Some(timeout) = self.timeout {
                    config = config.timeout(timeout);
                }
                Arc::new(SpoonacularClient::new(config)?)
            }
        };
        let search = Arc::new(RetryingSearch::new(search, self.retry));

        let cache_dir = self.cache_dir.unwrap_or_else(default_cache_dir);
        let store = ShardStore::new(cache_dir);

        Ok(Forage {
            fulfillment: Fulfillment::new(store, search),
        })
    }
}

impl Default for ForageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Default cache directory: `<user cache dir>/forage`.
fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("forage")
}
