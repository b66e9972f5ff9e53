//! Recency List Module
//!
//! Ordered record of every tagged key set through the store.

use std::collections::VecDeque;

use serde::Serialize;

use crate::variables::TaggedKey;

// == Cache Entry ==
/// The text form of the last value set under a tagged key.
///
/// Kept for display only; reads always go to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    pub key: TaggedKey,
    pub value: String,
}

impl CacheEntry {
    pub fn new(key: TaggedKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// == Recency List ==
/// Entries ordered by the time they were last set.
///
/// - Front = most recently set
/// - Back = least recently set
///
/// No two entries share a tagged key.
#[derive(Debug, Default)]
pub struct RecencyList {
    order: VecDeque<CacheEntry>,
}

impl RecencyList {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Upsert ==
    /// Records a value, replacing any entry with the same key and moving it to the front.
    pub fn upsert(&mut self, key: TaggedKey, value: String) {
        self.remove(&key);
        self.order.push_front(CacheEntry::new(key, value));
    }

    // == Remove ==
    /// Removes the entry for `key`, if any.
    pub fn remove(&mut self, key: &TaggedKey) -> Option<CacheEntry> {
        let index = self.order.iter().position(|entry| &entry.key == key)?;
        self.order.remove(index)
    }

    // == Retain ==
    /// Keeps only entries matching `keep`, preserving order. Returns the number removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&CacheEntry) -> bool) -> usize {
        let before = self.order.len();
        self.order.retain(|entry| keep(entry));
        before - self.order.len()
    }

    pub fn get(&self, key: &TaggedKey) -> Option<&CacheEntry> {
        self.order.iter().find(|entry| &entry.key == key)
    }

    /// Most recently set entry.
    pub fn newest(&self) -> Option<&CacheEntry> {
        self.order.front()
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &CacheEntry> + '_ {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
