//! Forage - recipe suggestions with a file-backed search cache
//!
//! This crate fetches recipe suggestions for a set of ingredients from
//! the Spoonacular API and caches the answers on disk, keyed by the
//! normalized ingredient set and requested result count. Repeating a
//! request is served from the cache; asking for more results than a
//! previous request fetches only the difference and merges.
//!
//! # Example
//!
//! ```rust,no_run
//! use forage::Forage;
//!
//! #[tokio::main]
//! async fn main() -> forage::Result<()> {
//!     let forage = Forage::builder()
//!         .api_key("your-spoonacular-key")
//!         .build()?;
//!
//!     let recipes = forage.fulfill("cheese, chicken, beef", 5).await?;
//!     for (i, recipe) in recipes.iter().enumerate() {
//!         println!("{}. {}", i + 1, recipe.display_title());
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod cache;
pub mod error;
pub mod ingredient;
pub mod recipe;
pub mod search;
pub mod telemetry;

// Re-export main types at crate root
pub use builder::{Forage, ForageBuilder};
pub use cache::{CacheKey, Fulfillment, ShardStore};
pub use error::{ForageError, Result};
pub use ingredient::IngredientSet;
pub use recipe::{DropReason, Normalized, RecipeRecord, normalize_entries, normalize_entry};
pub use search::{
    RecipeSearch, RetryConfig, RetryingSearch, SpoonacularClient, SpoonacularConfig,
};

/// Upper bound on the number of recipes a single request may ask for.
///
/// Callers clamp their input to `[1, MAX_RESULTS]` before invoking
/// [`Forage::fulfill`]; the engine itself does not re-validate.
pub const MAX_RESULTS: u32 = 20;
