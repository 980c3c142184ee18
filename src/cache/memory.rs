// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache implementation with per-entry expiry and optional size limits

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use super::{
    types::{AccessSequence, TimestampMillis},
    CacheKey, CacheStats, CacheStore,
};
use crate::errors::CacheError;

/// Entry in the memory cache with metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached value
    value: serde_json::Value,
    /// When this entry stops being served
    expires_at: TimestampMillis,
    /// When this entry was last accessed (for LRU eviction)
    last_accessed: TimestampMillis,
    /// Sequence number for deterministic LRU ordering when timestamps are equal
    access_seq: AccessSequence,
}

impl CacheEntry {
    fn new(value: serde_json::Value, life: Duration, access_seq: AccessSequence) -> Self {
        let now = TimestampMillis::now();
        Self {
            value,
            expires_at: now.after(life),
            last_accessed: now,
            access_seq,
        }
    }

    fn touch(&mut self, access_seq: AccessSequence) {
        self.last_accessed = TimestampMillis::now();
        self.access_seq = access_seq;
    }
}

/// Internal state for memory cache
#[derive(Debug, Default)]
struct MemoryCacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
    next_seq: AccessSequence,
}

/// In-memory cache with per-entry expiry and optional size limits
///
/// Every entry carries the lifetime it was written with, so block lookups,
/// balances and token decimals can share one store while expiring on their
/// own schedules.
///
/// # Examples
///
/// ```rust
/// use balancescan::MemoryCache;
///
/// // Unbounded cache
/// let cache = MemoryCache::new();
///
/// // Cache with size limit (LRU eviction)
/// let cache = MemoryCache::new().with_max_entries(1000);
/// ```
///
/// # Performance
///
/// - Get: O(1) average case (HashMap lookup)
/// - Set: O(n) (prunes expired entries, then finds the LRU entry if full)
#[derive(Debug, Default)]
pub struct MemoryCache {
    max_entries: Option<usize>,
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    /// Creates a new memory cache with no limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of entries in the cache
    ///
    /// When the limit is reached, the least recently used (LRU) entry will be evicted
    /// to make room for new entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Drops every expired entry, returning how many were removed
    fn prune_expired(state: &mut MemoryCacheState) -> usize {
        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.expires_at.is_past());
        before - state.entries.len()
    }

    /// Evicts the least recently used entry from the cache
    fn evict_lru(state: &mut MemoryCacheState) {
        let lru_key = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.last_accessed, entry.access_seq))
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            debug!(key = %key, "Evicting LRU cache entry");
            state.entries.remove(&key);
            state.stats.evictions += 1;
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut state = self.state.lock().await;
        let seq = state.next_seq;

        let Some(expired) = state
            .entries
            .get(key)
            .map(|entry| entry.expires_at.is_past())
        else {
            state.stats.misses += 1;
            debug!(key = %key, "Cache miss (memory)");
            return None;
        };

        if expired {
            debug!(key = %key, "Cache entry expired");
            state.entries.remove(key);
            state.stats.expirations += 1;
            state.stats.misses += 1;
            state.stats.entries = state.entries.len();
            return None;
        }

        let value = state.entries.get_mut(key).map(|entry| {
            entry.touch(seq);
            entry.value.clone()
        });
        state.next_seq = seq.next();
        state.stats.hits += 1;
        debug!(key = %key, "Cache hit (memory)");

        value
    }

    async fn set(
        &self,
        key: CacheKey,
        value: serde_json::Value,
        life: Duration,
    ) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;

        // Entries that are never read again still expire here
        let expired = Self::prune_expired(&mut state);
        if expired > 0 {
            state.stats.expirations += expired as u64;
            debug!(pruned = expired, "Pruned expired cache entries (memory)");
        }

        if let Some(max_entries) = self.max_entries {
            if !state.entries.contains_key(&key) {
                while !state.entries.is_empty() && state.entries.len() >= max_entries {
                    Self::evict_lru(&mut state);
                }
            }
        }

        let seq = state.next_seq;
        state.next_seq = seq.next();
        state.entries.insert(key, CacheEntry::new(value, life, seq));
        state.stats.entries = state.entries.len();

        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryCache"
    }
}
