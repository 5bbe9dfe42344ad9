//! Cache identity and shard persistence.
//!
//! A shard is one persisted cache unit for a specific
//! `(ingredient set, requested count)` pair, stored as
//! `cache_<key>_<count>.json` inside the configured cache directory.
//! The key is the sorted, underscore-joined ingredient tokens, so any
//! permutation of the same ingredients maps to the same shard family.
//!
//! Shard file names are parsed structurally: a name whose count segment
//! is not an integer is skipped with a warning, never a crash. Shards for
//! a longer key that happens to share this key's prefix (tokens cannot
//! contain underscores, but keys join tokens with them) are recognized
//! and silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::ingredient::IngredientSet;
use crate::{ForageError, Result};

const SHARD_PREFIX: &str = "cache_";
const SHARD_SUFFIX: &str = ".json";

/// Deterministic string identity for an ingredient set.
///
/// Equal sets always produce an identical key, regardless of the order
/// or multiplicity the ingredients were typed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key: tokens sorted lexicographically, joined with `_`.
    pub fn from_set(set: &IngredientSet) -> Self {
        Self(set.sorted_tokens().join("_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// File name for the shard holding `count` results under `key`.
pub fn shard_file_name(key: &CacheKey, count: u32) -> String {
    format!("{SHARD_PREFIX}{key}_{count}{SHARD_SUFFIX}")
}

/// File-backed store for cache shards, scoped to one directory.
///
/// The directory is an explicit constructor argument; there is no
/// ambient global cache path. The store owns all shard reads and writes;
/// nothing else in the crate touches the files.
#[derive(Debug, Clone)]
pub struct ShardStore {
    dir: PathBuf,
}

impl ShardStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configured cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the shard for `(key, count)`.
    pub fn shard_path(&self, key: &CacheKey, count: u32) -> PathBuf {
        self.dir.join(shard_file_name(key, count))
    }

    /// Counts of every shard persisted for `key`, sorted ascending.
    ///
    /// Scans the cache directory for `cache_<key>_<n>.json`. Names with a
    /// malformed count segment are skipped with a warning; names
    /// belonging to a longer key sharing this key's prefix are ignored.
    pub fn list_counts(&self, key: &CacheKey) -> Vec<u32> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // Missing directory means nothing cached yet.
            Err(_) => return Vec::new(),
        };

        let mut counts = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name
                .strip_prefix(SHARD_PREFIX)
                .and_then(|s| s.strip_suffix(SHARD_SUFFIX))
            else {
                continue;
            };
            let Some(rest) = stem
                .strip_prefix(key.as_str())
                .and_then(|r| r.strip_prefix('_'))
            else {
                continue;
            };
            match rest.parse::<u32>() {
                Ok(count) => counts.push(count),
                // An underscore in the remainder means a longer key that
                // shares this key's prefix; anything else is malformed.
                Err(_) if rest.contains('_') => {}
                Err(_) => {
                    warn!(file = name, "skipping cache shard with malformed count segment");
                }
            }
        }
        counts.sort_unstable();
        counts
    }

    /// Load the shard for `(key, count)`.
    ///
    /// Returns `None` on a missing file, and `None` with a warning on
    /// unreadable or unparsable content: a corrupt shard is treated as
    /// absent by the fulfillment engine and overwritten on the next save.
    pub fn load(&self, key: &CacheKey, count: u32) -> Option<Vec<Value>> {
        let path = self.shard_path(key, count);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cache shard");
                return None;
            }
        };
        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(entries) => {
                debug!(path = %path.display(), entries = entries.len(), "loaded cache shard");
                Some(entries)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cache shard, treating as absent");
                None
            }
        }
    }

    /// Persist `entries` as the shard for `(key, count)`, creating the
    /// cache directory if needed (atomic write via tmp + rename).
    pub fn save(&self, key: &CacheKey, count: u32, entries: &[Value]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ForageError::Storage(format!(
                "failed to create cache dir {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.shard_path(key, count);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp_path, &json).map_err(|e| {
            ForageError::Storage(format!(
                "failed to write cache shard {}: {e}",
                tmp_path.display()
            ))
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            ForageError::Storage(format!(
                "failed to rename cache shard {} → {}: {e}",
                tmp_path.display(),
                path.display()
            ))
        })?;

        debug!(path = %path.display(), entries = entries.len(), "saved cache shard");
        Ok(())
    }
}
