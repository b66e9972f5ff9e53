//! Variable store snapshot
//!
//! A point-in-time, serializable copy of the tracked variables.

use serde::Serialize;

use crate::variables::{CacheEntry, VariableKind, VariableStats};

/// One tracked variable, with its tagged key split into parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry {
    /// Rendered tagged key, e.g. `{INT:score}`
    pub key: String,
    pub kind: VariableKind,
    /// Caller-supplied logical name
    pub name: String,
    /// Text of the last value set
    pub value: String,
}

impl From<&CacheEntry> for SnapshotEntry {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            key: entry.key.to_string(),
            kind: entry.key.kind(),
            name: entry.key.name().to_string(),
            value: entry.value.clone(),
        }
    }
}

/// Tracked variables, most recently set first, plus store counters.
#[derive(Debug, Clone, Serialize)]
pub struct VariableSnapshot {
    /// When the snapshot was taken, RFC 3339
    pub taken_at: String,
    pub entries: Vec<SnapshotEntry>,
    pub stats: VariableStats,
}

impl VariableSnapshot {
    /// Creates a snapshot stamped with the current time.
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a CacheEntry>, stats: VariableStats) -> Self {
        Self {
            taken_at: chrono::Utc::now().to_rfc3339(),
            entries: entries.into_iter().map(SnapshotEntry::from).collect(),
            stats,
        }
    }
}
