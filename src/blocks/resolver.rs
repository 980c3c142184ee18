// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block resolution with bounded retry and result caching
//!
//! # Retry policy
//!
//! ```text
//! attempt 0 ──► Reply(status "1") ──────────────► Ok
//!    │         Permanent ───────────────────────► Err(Rejected)
//!    │         Transient / Reply(status != "1")
//!    ▼
//! attempt < max_retries ? sleep(retry_delay), attempt += 1, loop
//!                       : Err(RetriesExhausted { attempts: max_retries + 1 })
//! ```
//!
//! The first request is not counted against the retry budget, so the default
//! budget of 5 issues at most 6 requests per timestamp.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::BlockNumber;
use tracing::{debug, warn, Instrument};

use crate::cache::{CacheKey, CacheStore, CacheStoreExt};
use crate::config::constants;
use crate::config::BalanceHistoryConfig;
use crate::errors::BlockResolutionError;
use crate::explorer::{BlockExplorer, ExplorerReply, ExplorerResponse};
use crate::tracing::spans;
use crate::types::timestamp::UnixTimestamp;

/// Resolves Unix timestamps to block numbers through a block explorer
///
/// Results are cached under `tsBlock_<timestamp>`; the block at or before a
/// timestamp does not depend on contract or holder, so one entry serves every
/// balance lookup at that moment.
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::{BlockResolver, EtherscanClient, MemoryCache};
/// use std::sync::Arc;
///
/// let explorer = EtherscanClient::new(reqwest::Client::new(), url, api_key);
/// let resolver = BlockResolver::new(Arc::new(explorer), Arc::new(MemoryCache::new()));
///
/// let block = resolver.resolve_block(UnixTimestamp(1609459200)).await?;
/// ```
pub struct BlockResolver {
    explorer: Arc<dyn BlockExplorer>,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl BlockResolver {
    /// Creates a resolver with the default TTL and retry policy
    pub fn new(explorer: Arc<dyn BlockExplorer>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            explorer,
            cache,
            ttl: constants::ttl::BLOCK_LOOKUP,
            max_retries: constants::explorer::DEFAULT_MAX_RETRIES,
            retry_delay: constants::explorer::DEFAULT_RETRY_DELAY,
        }
    }

    /// Creates a resolver using the TTL and retry policy from `config`
    pub fn from_config(
        explorer: Arc<dyn BlockExplorer>,
        cache: Arc<dyn CacheStore>,
        config: &BalanceHistoryConfig,
    ) -> Self {
        Self::new(explorer, cache)
            .with_ttl(config.block_cache_ttl)
            .with_max_retries(config.max_retries)
            .with_retry_delay(config.retry_delay)
    }

    /// Sets how long resolved blocks stay cached
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets how many re-attempts follow the first failed request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the fixed delay between attempts
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Resolves `timestamp` to the latest block at or before it
    ///
    /// Returns `Ok(None)` when the explorer reports success with an empty
    /// result. Empty results are not cached.
    ///
    /// # Errors
    ///
    /// - [`BlockResolutionError::RetriesExhausted`] if every attempt failed
    /// - [`BlockResolutionError::Rejected`] on a permanent transport failure
    /// - [`BlockResolutionError::InvalidBlockNumber`] if the result is not a block number
    pub async fn resolve_block(
        &self,
        timestamp: UnixTimestamp,
    ) -> Result<Option<BlockNumber>, BlockResolutionError> {
        async move {
            let key = CacheKey::block_lookup(timestamp);

            if let Some(block) = self.cache.get_json::<BlockNumber>(&key).await {
                debug!(
                    timestamp = %timestamp,
                    block_number = block,
                    cache = %self.cache.name(),
                    "Retrieved block number from cache"
                );
                return Ok(Some(block));
            }

            let reply = self.request_with_retry(timestamp).await?;

            let raw = reply.result.as_deref().map(str::trim).unwrap_or_default();
            if raw.is_empty() {
                debug!(timestamp = %timestamp, "Block explorer returned an empty result");
                return Ok(None);
            }

            let block = parse_block_number(raw)
                .ok_or_else(|| BlockResolutionError::invalid_block_number(timestamp, raw))?;

            debug!(timestamp = %timestamp, block_number = block, "Resolved block number");
            self.cache.set_json(key, &block, self.ttl).await;

            Ok(Some(block))
        }
        .instrument(spans::resolve_block(timestamp))
        .await
    }

    async fn request_with_retry(
        &self,
        timestamp: UnixTimestamp,
    ) -> Result<ExplorerReply, BlockResolutionError> {
        let mut attempt = 0u32;
        loop {
            let failure = match self.explorer.block_number_by_time(timestamp).await {
                ExplorerResponse::Reply(reply) if reply.is_success() => {
                    if attempt > 0 {
                        debug!(timestamp = %timestamp, attempt, "Block lookup succeeded after retry");
                    }
                    return Ok(reply);
                }
                ExplorerResponse::Reply(reply) => reply.describe_failure(),
                ExplorerResponse::Transient { reason } => reason,
                ExplorerResponse::Permanent { reason } => {
                    warn!(timestamp = %timestamp, reason = %reason, "Block lookup rejected, not retrying");
                    return Err(BlockResolutionError::rejected(
                        timestamp,
                        self.explorer.endpoint(),
                        reason,
                    ));
                }
            };

            if attempt >= self.max_retries {
                warn!(
                    timestamp = %timestamp,
                    attempts = attempt + 1,
                    failure = %failure,
                    "Max retries exceeded"
                );
                return Err(BlockResolutionError::retries_exhausted(
                    timestamp,
                    self.explorer.endpoint(),
                    attempt + 1,
                    failure,
                ));
            }

            attempt += 1;
            warn!(
                timestamp = %timestamp,
                attempt,
                max_retries = self.max_retries,
                delay_ms = self.retry_delay.as_millis(),
                failure = %failure,
                "Block lookup failed, retrying"
            );
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}

/// Parses a block number given as a decimal or `0x`-prefixed hex string
fn parse_block_number(raw: &str) -> Option<BlockNumber> {
    match raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
    {
        Some(hex) => BlockNumber::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
