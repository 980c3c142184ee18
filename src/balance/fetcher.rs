// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cached historical balance lookups

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use tracing::{debug, Instrument};

use super::TokenBalanceSource;
use crate::blocks::BlockResolver;
use crate::cache::{CacheKey, CacheStore, CacheStoreExt};
use crate::config::constants::ttl;
use crate::config::BalanceHistoryConfig;
use crate::errors::{BalanceFetchError, RpcError};
use crate::tracing::spans;
use crate::types::timestamp::UnixTimestamp;
use crate::types::tokens::TokenDecimals;

/// Fetches a holder's scaled token balance at a past timestamp
///
/// A lookup on a cold cache runs three upstream reads in order: block
/// resolution, `balanceOf` at that block, then `decimals`. The scaled result is
/// cached per (contract, holder, timestamp, provider URL); decimals are cached
/// per contract.
///
/// # Examples
///
/// ```rust,ignore
/// let fetcher = BalanceFetcher::new(resolver, Arc::new(source), cache);
/// let balance = fetcher
///     .fetch_balance(usdc, holder, UnixTimestamp(1609459200))
///     .await?;
/// ```
pub struct BalanceFetcher {
    resolver: BlockResolver,
    source: Arc<dyn TokenBalanceSource>,
    cache: Arc<dyn CacheStore>,
    balance_ttl: Duration,
    decimals_ttl: Duration,
}

impl BalanceFetcher {
    /// Creates a fetcher with the default cache lifetimes
    pub fn new(
        resolver: BlockResolver,
        source: Arc<dyn TokenBalanceSource>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            resolver,
            source,
            cache,
            balance_ttl: ttl::BALANCE,
            decimals_ttl: ttl::TOKEN_DECIMALS,
        }
    }

    /// Creates a fetcher using the cache lifetimes from `config`
    pub fn from_config(
        resolver: BlockResolver,
        source: Arc<dyn TokenBalanceSource>,
        cache: Arc<dyn CacheStore>,
        config: &BalanceHistoryConfig,
    ) -> Self {
        Self {
            balance_ttl: config.balance_cache_ttl,
            decimals_ttl: config.decimals_cache_ttl,
            ..Self::new(resolver, source, cache)
        }
    }

    /// Balance of `holder` on `contract` at `timestamp`, in whole tokens
    ///
    /// The raw balance is divided by 10^decimals and the remainder discarded.
    ///
    /// # Errors
    ///
    /// - [`BalanceFetchError::BlockNotFound`] if the timestamp resolves to no block
    /// - [`BalanceFetchError::Resolution`] if block resolution fails
    /// - [`BalanceFetchError::Rpc`] if a contract read fails (not retried)
    pub async fn fetch_balance(
        &self,
        contract: Address,
        holder: Address,
        timestamp: UnixTimestamp,
    ) -> Result<U256, BalanceFetchError> {
        async move {
            let key = CacheKey::balance(contract, holder, timestamp, self.source.endpoint());

            if let Some(balance) = self.cache.get_json::<U256>(&key).await {
                debug!(
                    timestamp = %timestamp,
                    balance = %balance,
                    cache = %self.cache.name(),
                    "Retrieved balance from cache"
                );
                return Ok(balance);
            }

            let block = self
                .resolver
                .resolve_block(timestamp)
                .await?
                .ok_or_else(|| BalanceFetchError::block_not_found(timestamp))?;

            let raw = self.source.balance_of(contract, holder, block).await?;
            let decimals = self.token_decimals(contract).await?;
            let balance = raw.whole_units(decimals);

            debug!(
                timestamp = %timestamp,
                block_number = block,
                raw = %raw,
                decimals = decimals.as_u8(),
                balance = %balance,
                "Fetched historical balance"
            );

            self.cache.set_json(key, &balance, self.balance_ttl).await;
            Ok(balance)
        }
        .instrument(spans::fetch_balance(contract, holder, timestamp))
        .await
    }

    /// Decimals of `contract`, read through the long-lived decimals cache
    pub async fn token_decimals(&self, contract: Address) -> Result<TokenDecimals, RpcError> {
        let key = CacheKey::token_decimals(contract);

        if let Some(decimals) = self.cache.get_json::<TokenDecimals>(&key).await {
            debug!(contract = %contract, decimals = decimals.as_u8(), "Retrieved token decimals from cache");
            return Ok(decimals);
        }

        let decimals = self.source.decimals(contract).await?;
        self.cache.set_json(key, &decimals, self.decimals_ttl).await;
        Ok(decimals)
    }
}
