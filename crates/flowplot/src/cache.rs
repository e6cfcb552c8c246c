//! Bounded, per-mode LRU store of computed position maps.
//!
//! Each layout mode owns its own recency list; pressure in one mode never evicts another mode's
//! entries. Recency is the order of an [`IndexMap`]: the front is the least recently used entry
//! and a touch moves an entry to the back.

use crate::graph::Positions;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheOptions {
    /// Entries kept per layout mode. Values below 1 are treated as 1.
    pub capacity: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Stores and returns owned copies, so callers can never mutate a cached layout in place.
///
/// Not synchronized: every recency-affecting call takes `&mut self`. Share it across threads by
/// wrapping it in a mutex or keeping it behind a single owner.
#[derive(Debug, Clone)]
pub struct LayoutPositionCache {
    capacity: usize,
    modes: FxHashMap<String, IndexMap<String, Positions>>,
}

impl Default for LayoutPositionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutPositionCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            modes: FxHashMap::default(),
        }
    }

    pub fn from_options(opts: &CacheOptions) -> Self {
        Self::with_capacity(opts.capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stores a copy of `positions` as the most recently used entry of `mode`.
    ///
    /// Re-saving an existing fingerprint replaces it and refreshes its recency. When the mode is
    /// full, its least recently used entry is evicted first.
    pub fn save(&mut self, mode: &str, fingerprint: &str, positions: &Positions) {
        let capacity = self.capacity;
        let entries = self.modes.entry(mode.to_string()).or_default();
        entries.shift_remove(fingerprint);
        while entries.len() >= capacity {
            let Some((evicted, _)) = entries.shift_remove_index(0) else {
                break;
            };
            tracing::debug!(mode, fingerprint = %evicted, "layout cache evict");
        }
        entries.insert(fingerprint.to_string(), positions.clone());
    }

    /// Returns a copy of the stored positions and marks the entry most recently used.
    pub fn get(&mut self, mode: &str, fingerprint: &str) -> Option<Positions> {
        let hit = self.modes.get_mut(mode).and_then(|entries| {
            let idx = entries.get_index_of(fingerprint)?;
            let last = entries.len() - 1;
            entries.move_index(idx, last);
            entries.get_index(last).map(|(_, positions)| positions.clone())
        });
        tracing::debug!(mode, fingerprint, hit = hit.is_some(), "layout cache lookup");
        hit
    }

    /// Membership test that leaves recency untouched.
    pub fn contains(&self, mode: &str, fingerprint: &str) -> bool {
        self.modes
            .get(mode)
            .is_some_and(|entries| entries.contains_key(fingerprint))
    }

    /// Number of entries held for `mode`.
    pub fn len(&self, mode: &str) -> usize {
        self.modes.get(mode).map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.modes.values().all(IndexMap::is_empty)
    }

    /// Fingerprints of `mode`, least recently used first.
    pub fn fingerprints(&self, mode: &str) -> Vec<&str> {
        self.modes
            .get(mode)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Drops every entry of every mode.
    pub fn clear(&mut self) {
        self.modes.clear();
    }
}
