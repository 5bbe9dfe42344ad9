//! Recipe records and result normalization.
//!
//! Cache shards and search responses both carry loosely-shaped JSON:
//! freshly fetched entries are objects, but stored shards may contain
//! text-encoded entries (legacy or corrupted writes) or outright garbage.
//! [`normalize_entries`] converts such a sequence into clean
//! [`RecipeRecord`]s, dropping anything unrecoverable.
//!
//! Dropping is an explicit policy, not an accident: [`normalize_entry`]
//! reports a per-entry [`Normalized`] outcome so callers can observe
//! drops (they are also counted and logged at debug level) without
//! changing the default behavior of silently excluding them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::telemetry;

/// One recipe entry: a human-readable title plus otherwise-opaque fields.
///
/// `title` is optional (some upstream entries omit it) and every other
/// field is preserved verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecipeRecord {
    /// The title, or a placeholder when the entry has none.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Name")
    }
}

/// Why an entry was discarded during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// A text entry that does not parse as JSON.
    UnparsableText,
    /// Parsed fine but is not an object (array, number, bool, null...).
    NotARecord,
}

impl DropReason {
    /// Stable label used for metrics and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::UnparsableText => "unparsable_text",
            DropReason::NotARecord => "not_a_record",
        }
    }
}

/// Per-entry normalization outcome.
#[derive(Debug)]
pub enum Normalized {
    Kept(RecipeRecord),
    Dropped(DropReason),
}

/// Normalize a single stored-or-fetched entry.
///
/// Text entries are parsed as JSON first; a parse failure drops the
/// entry. Whatever remains must be an object to be kept; any other
/// shape drops. Never fails.
pub fn normalize_entry(value: Value) -> Normalized {
    let value = match value {
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => parsed,
            Err(_) => return Normalized::Dropped(DropReason::UnparsableText),
        },
        other => other,
    };

    match value {
        Value::Object(mut fields) => {
            let title = match fields.remove("title") {
                Some(Value::String(title)) => Some(title),
                // Non-string titles stay opaque rather than failing the record.
                Some(other) => {
                    fields.insert("title".to_string(), other);
                    None
                }
                None => None,
            };
            Normalized::Kept(RecipeRecord {
                title,
                extra: fields,
            })
        }
        _ => Normalized::Dropped(DropReason::NotARecord),
    }
}

/// Normalize a sequence of entries, preserving order.
///
/// Dropped entries are counted and logged at debug level; the output is
/// therefore at most as long as the input.
pub fn normalize_entries(entries: Vec<Value>) -> Vec<RecipeRecord> {
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        match normalize_entry(entry) {
            Normalized::Kept(record) => kept.push(record),
            Normalized::Dropped(reason) => {
                metrics::counter!(
                    telemetry::DROPPED_ENTRIES_TOTAL,
                    "reason" => reason.as_str(),
                )
                .increment(1);
                debug!(reason = reason.as_str(), "dropped unnormalizable result entry");
            }
        }
    }
    kept
}
