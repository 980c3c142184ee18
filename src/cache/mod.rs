// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache backends for block lookups, balances and token decimals
//!
//! Every lookup reads through a [`CacheStore`] before touching the network.
//! Entries carry their own lifetime and expire passively; nothing is ever
//! explicitly invalidated.
//!
//! - [`MemoryCache`]: In-memory cache with optional size limits
//! - [`DiskCache`]: Persistent JSON-based cache with file locking
//! - [`NoOpCache`]: Disables caching entirely
//!
//! # Examples
//!
//! ```rust,ignore
//! use balancescan::{BalanceHistoryClient, DiskCache, MemoryCache};
//! use std::sync::Arc;
//!
//! // Persistent cache shared across runs
//! let cache = DiskCache::new("balance_cache.json").validate()?;
//! let client = BalanceHistoryClient::new(Arc::new(cache));
//!
//! // Memory cache (no persistence)
//! let client = BalanceHistoryClient::new(Arc::new(MemoryCache::new().with_max_entries(10_000)));
//! ```

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CacheError;

mod disk;
pub mod keys;
mod memory;
mod noop;
pub mod types;

pub use disk::DiskCache;
pub use keys::CacheKey;
pub use memory::MemoryCache;
pub use noop::NoOpCache;

/// Statistics about cache performance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Number of entries expired due to their lifetime
    pub expirations: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, expirations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.expirations,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Key-value store with per-entry time-to-live
///
/// Values are opaque JSON documents. Use [`CacheStoreExt`] for typed access.
///
/// # Thread Safety
///
/// Implementations must support concurrent access from independent
/// aggregations. Single-key get/set is the only contract; concurrent writers
/// to one key are last-writer-wins, which is fine because values for a key
/// are deterministic.
///
/// # Error Handling
///
/// Reads never fail: a read error is logged and reported as a miss. Writes
/// return `Err` so callers can log them, but callers must not fail the
/// surrounding lookup because of a failed write.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves a live entry
    ///
    /// Returns `None` if the key is absent, the entry has expired, or the
    /// backend could not be read.
    async fn get(&self, key: &CacheKey) -> Option<serde_json::Value>;

    /// Stores an entry that expires `life` from now
    async fn set(
        &self,
        key: CacheKey,
        value: serde_json::Value,
        life: Duration,
    ) -> Result<(), CacheError>;

    /// Returns current cache statistics
    async fn stats(&self) -> CacheStats;

    /// Returns a human-readable name for this cache backend
    fn name(&self) -> &'static str;
}

/// Typed helpers over any [`CacheStore`]
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Reads and decodes an entry; undecodable values count as misses
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &CacheKey) -> Option<T> {
        let value = self.get(key).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Encodes and stores an entry, logging instead of failing on errors
    async fn set_json<T: Serialize + Sync>(&self, key: CacheKey, value: &T, life: Duration) {
        let encoded = match serde_json::to_value(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode cache entry (continuing anyway)");
                return;
            }
        };

        let key_display = key.to_string();
        if let Err(e) = self.set(key, encoded, life).await {
            warn!(key = %key_display, error = %e, "Failed to write cache entry (continuing anyway)");
        } else {
            debug!(key = %key_display, life_secs = life.as_secs(), cache = self.name(), "Cached entry");
        }
    }
}

impl<C: CacheStore + ?Sized> CacheStoreExt for C {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 75.0);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_stats_display() {
        let stats = CacheStats {
            hits: 1,
            misses: 1,
            evictions: 0,
            expirations: 2,
            entries: 4,
        };
        assert_eq!(
            stats.to_string(),
            "hits=1, misses=1, evictions=0, expirations=2, entries=4, hit_rate=50.0%"
        );
    }

    #[tokio::test]
    async fn test_typed_round_trip_through_dyn_store() {
        let cache: std::sync::Arc<dyn CacheStore> = std::sync::Arc::new(MemoryCache::new());
        let key = CacheKey::new("tsBlock_1");

        cache
            .set_json(key.clone(), &11_565_019u64, Duration::from_secs(60))
            .await;
        assert_eq!(cache.get_json::<u64>(&key).await, Some(11_565_019));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("token_decimal_0x0");
        cache
            .set(key.clone(), serde_json::json!("not a number"), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get_json::<u8>(&key).await, None);
    }
}
