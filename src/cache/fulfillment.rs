//! Cache fulfillment engine.
//!
//! Owns the read-modify-write lifecycle of cache shards. Given a raw
//! ingredient string and a requested count, decides between:
//!
//! - **hit** — some shard for the ingredient identity already covers the
//!   requested count: serve its first `count` entries, no network call;
//! - **partial hit** — a shard exists but holds fewer records than
//!   requested: fetch only the difference, append after the existing
//!   records in fetch order, persist the merge to the exact
//!   `(key, count)` shard;
//! - **miss** — nothing usable cached (including a corrupt shard): fetch
//!   the full count and persist, overwriting a corrupt shard if present.
//!
//! A search failure after retry exhaustion surfaces as `Err` on every
//! path; callers render it as an error plus an empty recipe list. Count
//! bounds are the caller's responsibility; the engine trusts its input.

use std::sync::Arc;

use tracing::info;

use super::shard::{CacheKey, ShardStore};
use crate::ingredient::IngredientSet;
use crate::recipe::{RecipeRecord, normalize_entries};
use crate::search::RecipeSearch;
use crate::telemetry;
use crate::Result;

/// The cache fulfillment engine: shard store + search collaborator.
pub struct Fulfillment {
    store: ShardStore,
    search: Arc<dyn RecipeSearch>,
}

impl Fulfillment {
    pub fn new(store: ShardStore, search: Arc<dyn RecipeSearch>) -> Self {
        Self { store, search }
    }

    /// The shard store this engine persists through.
    pub fn store(&self) -> &ShardStore {
        &self.store
    }

    /// Fetch up to `count` recipes for the given raw ingredient input,
    /// serving from the shard cache where possible.
    ///
    /// Input that fails normalization
    /// ([`InvalidIngredient`](crate::ForageError::InvalidIngredient) /
    /// [`EmptyIngredients`](crate::ForageError::EmptyIngredients))
    /// propagates untouched: the engine never substitutes, the caller
    /// re-prompts. `count` is expected to be pre-clamped to
    /// `[1, MAX_RESULTS]`.
    pub async fn fulfill(&self, ingredients: &str, count: u32) -> Result<Vec<RecipeRecord>> {
        let set = IngredientSet::parse(ingredients)?;
        let key = CacheKey::from_set(&set);
        let query = set.joined();

        let counts = self.store.list_counts(&key);
        let max_cached = counts.last().copied().unwrap_or(0);

        // Prefer the exact shard; otherwise the largest one for this key.
        let source_count = if counts.contains(&count) {
            Some(count)
        } else {
            counts.last().copied()
        };
        let loaded = source_count.and_then(|c| self.store.load(&key, c));

        match loaded {
            Some(mut entries) if max_cached >= count => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                info!(%key, count, cached = entries.len(), "serving from cache");
                entries.truncate(count as usize);
                Ok(normalize_entries(entries))
            }
            Some(mut entries) => {
                metrics::counter!(telemetry::CACHE_PARTIAL_HITS_TOTAL).increment(1);
                let needed = (count as usize).saturating_sub(entries.len());
                info!(%key, count, cached = entries.len(), needed, "partial cache hit, fetching remainder");
                if needed > 0 {
                    let fresh = self.search.search(&query, needed as u32).await?;
                    entries.extend(fresh);
                }
                self.store.save(&key, count, &entries)?;
                Ok(normalize_entries(entries))
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                info!(%key, count, "cache miss, fetching fresh");
                let entries = self.search.search(&query, count).await?;
                self.store.save(&key, count, &entries)?;
                Ok(normalize_entries(entries))
            }
        }
    }
}
