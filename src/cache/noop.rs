// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! No-op cache implementation (disables caching)

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

use super::{CacheKey, CacheStats, CacheStore};
use crate::errors::CacheError;

/// No-op cache that never stores anything
///
/// Every lookup goes to the block explorer and the RPC provider. Use this
/// for one-off queries or for tests that need to observe every upstream call.
///
/// # Examples
///
/// ```rust
/// use balancescan::{BalanceHistoryClient, NoOpCache};
/// use std::sync::Arc;
///
/// let client = BalanceHistoryClient::new(Arc::new(NoOpCache::default()));
/// ```
#[derive(Debug, Default)]
pub struct NoOpCache {
    misses: AtomicU64,
}

#[async_trait]
impl CacheStore for NoOpCache {
    async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        trace!(key = %key, "NoOpCache: get (always miss)");
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    async fn set(
        &self,
        key: CacheKey,
        _value: serde_json::Value,
        _life: Duration,
    ) -> Result<(), CacheError> {
        trace!(key = %key, "NoOpCache: set (discarded)");
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats {
            misses: self.misses.load(Ordering::Relaxed),
            ..Default::default()
        }
    }

    fn name(&self) -> &'static str {
        "NoOpCache"
    }
}
