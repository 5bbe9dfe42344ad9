//! Telemetry metric name constants.
//!
//! Centralised metric names for forage operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `forage_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `operation` — operation invoked (e.g. "search")
//! - `status` — outcome: "ok" or "error"
//! - `reason` — drop classification for discarded result entries

/// Total search requests dispatched to the remote collaborator.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const SEARCH_REQUESTS_TOTAL: &str = "forage_search_requests_total";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `operation`.
pub const RETRIES_TOTAL: &str = "forage_retries_total";

/// Total full cache hits (request satisfied without any network call).
pub const CACHE_HITS_TOTAL: &str = "forage_cache_hits_total";

/// Total partial cache hits (existing shard topped up with a fetch).
pub const CACHE_PARTIAL_HITS_TOTAL: &str = "forage_cache_partial_hits_total";

/// Total cache misses (no usable shard, full fetch).
pub const CACHE_MISSES_TOTAL: &str = "forage_cache_misses_total";

/// Total result entries dropped during normalization.
///
/// Labels: `reason` ("unparsable_text" | "not_a_record").
pub const DROPPED_ENTRIES_TOTAL: &str = "forage_dropped_entries_total";
