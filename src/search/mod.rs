//! Remote recipe-search collaborator.
//!
//! The cache layer talks to the network through the [`RecipeSearch`]
//! trait, so tests can substitute a mock and the retry policy can be
//! layered as a decorator:
//!
//! - [`SpoonacularClient`] — the real HTTP implementation.
//! - [`RetryingSearch`] — wraps any `RecipeSearch` with retry on
//!   transient errors, configured via [`RetryConfig`].
//!
//! Search results are returned as raw JSON values: the cache persists
//! exactly what the collaborator produced, and record normalization
//! happens once, on the way back to the caller.

pub mod retry;
pub mod spoonacular;

pub use retry::{RetryConfig, RetryingSearch};
pub use spoonacular::{SpoonacularClient, SpoonacularConfig};

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// A remote recipe-search exchange.
///
/// Takes the comma-joined canonical ingredient list and a desired result
/// count; returns the raw result entries or fails with an error the
/// retry layer classifies via
/// [`ForageError::is_transient()`](crate::ForageError::is_transient).
#[async_trait]
pub trait RecipeSearch: Send + Sync {
    /// Collaborator name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch up to `count` recipe entries for `ingredients`.
    ///
    /// The collaborator may return fewer entries than requested.
    async fn search(&self, ingredients: &str, count: u32) -> Result<Vec<Value>>;
}
