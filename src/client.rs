// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! High-level entry points for historical balances
//!
//! [`BalanceHistoryClient`] wires a block explorer, an RPC provider and a
//! shared cache into a [`BalanceAggregator`] for each call. The cache outlives
//! individual calls, so repeated queries for the same holder stay off the
//! network.

use std::path::Path;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use url::Url;

use crate::balance::{BalanceFetcher, Erc20BalanceSource, TokenBalanceSource};
use crate::blocks::BlockResolver;
use crate::cache::{CacheStats, CacheStore, DiskCache, MemoryCache, NoOpCache};
use crate::config::BalanceHistoryConfig;
use crate::errors::{AggregationError, BalanceHistoryError};
use crate::explorer::{BlockExplorer, EtherscanClient};
use crate::history::{AggregationResult, BalanceAggregator, TimeUnit};
use crate::provider::{create_http_provider, ProviderConfig};
use crate::types::timestamp::UnixTimestamp;

/// Parameters shared by the `get_balance_since_x_*` entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// ERC-20 token contract
    pub contract_address: Address,
    /// Holder whose balance is tracked
    pub user_address: Address,
    /// Block explorer API key
    pub etherscan_api_key: String,
    /// RPC endpoint used for `balanceOf` and `decimals`
    pub provider_url: String,
}

impl HistoryQuery {
    /// Create a new query
    pub fn new(
        contract_address: Address,
        user_address: Address,
        etherscan_api_key: impl Into<String>,
        provider_url: impl Into<String>,
    ) -> Self {
        Self {
            contract_address,
            user_address,
            etherscan_api_key: etherscan_api_key.into(),
            provider_url: provider_url.into(),
        }
    }
}

/// Historical token balances and their averages over time
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::{BalanceHistoryClient, HistoryQuery};
///
/// let client = BalanceHistoryClient::with_disk_cache("balance_cache.json")?;
/// let query = HistoryQuery::new(usdc, holder, etherscan_api_key, rpc_url);
///
/// let result = client.get_balance_since_x_days(7, &query).await?;
/// println!("7 day average: {}", result.average_balance);
/// ```
pub struct BalanceHistoryClient {
    config: BalanceHistoryConfig,
    cache: Arc<dyn CacheStore>,
    http: reqwest::Client,
    upstreams: Option<Upstreams>,
}

/// Fixed explorer and balance source used in place of per-call ones
struct Upstreams {
    explorer: Arc<dyn BlockExplorer>,
    source: Arc<dyn TokenBalanceSource>,
}

impl BalanceHistoryClient {
    /// Creates a client over the given cache with the default configuration
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self {
            config: BalanceHistoryConfig::default(),
            cache,
            http: reqwest::Client::new(),
            upstreams: None,
        }
    }

    /// Creates a client with an unbounded in-memory cache
    pub fn with_memory_cache() -> Self {
        Self::new(Arc::new(MemoryCache::new()))
    }

    /// Creates a client with a persistent JSON cache at `cache_path`
    ///
    /// # Errors
    ///
    /// Returns [`BalanceHistoryError::Cache`] if the cache directory cannot
    /// be created.
    pub fn with_disk_cache(cache_path: impl AsRef<Path>) -> Result<Self, BalanceHistoryError> {
        let cache = DiskCache::new(cache_path.as_ref()).validate()?;
        Ok(Self::new(Arc::new(cache)))
    }

    /// Creates a client that never caches
    pub fn without_cache() -> Self {
        Self::new(Arc::new(NoOpCache::default()))
    }

    /// Replaces the configuration
    pub fn with_config(mut self, config: BalanceHistoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Routes every lookup through `explorer` and `source`
    ///
    /// The API key and provider URL passed to the entry points are then
    /// ignored. Meant for tests and for callers with their own transports.
    #[doc(hidden)]
    pub fn with_upstreams(
        mut self,
        explorer: Arc<dyn BlockExplorer>,
        source: Arc<dyn TokenBalanceSource>,
    ) -> Self {
        self.upstreams = Some(Upstreams { explorer, source });
        self
    }

    /// The active configuration
    pub fn config(&self) -> &BalanceHistoryConfig {
        &self.config
    }

    /// Statistics of the shared cache
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Whole-token balance of `user_address` at `timestamp_secs`
    ///
    /// # Errors
    ///
    /// Returns [`BalanceHistoryError::Balance`] if block resolution or a
    /// contract read fails, and [`BalanceHistoryError::Rpc`] for an invalid
    /// provider URL.
    pub async fn get_balance_history(
        &self,
        contract_address: Address,
        user_address: Address,
        timestamp_secs: i64,
        etherscan_api_key: &str,
        provider_url: &str,
    ) -> Result<U256, BalanceHistoryError> {
        let fetcher = self.fetcher(etherscan_api_key, provider_url)?;
        let balance = fetcher
            .fetch_balance(contract_address, user_address, UnixTimestamp(timestamp_secs))
            .await?;
        Ok(balance)
    }

    /// Balances at now and the close of each of the last `count` hours
    pub async fn get_balance_since_x_hours(
        &self,
        count: u32,
        query: &HistoryQuery,
    ) -> Result<AggregationResult, BalanceHistoryError> {
        self.aggregate(TimeUnit::Hours, count, query).await
    }

    /// Balances at now and the close of each of the last `count` days
    pub async fn get_balance_since_x_days(
        &self,
        count: u32,
        query: &HistoryQuery,
    ) -> Result<AggregationResult, BalanceHistoryError> {
        self.aggregate(TimeUnit::Days, count, query).await
    }

    /// Balances at now and the close of each of the last `count` months
    pub async fn get_balance_since_x_months(
        &self,
        count: u32,
        query: &HistoryQuery,
    ) -> Result<AggregationResult, BalanceHistoryError> {
        self.aggregate(TimeUnit::Months, count, query).await
    }

    /// Balances at now and the close of each of the last `count` years
    pub async fn get_balance_since_x_years(
        &self,
        count: u32,
        query: &HistoryQuery,
    ) -> Result<AggregationResult, BalanceHistoryError> {
        self.aggregate(TimeUnit::Years, count, query).await
    }

    /// Balances over `count` periods of a unit given by name
    ///
    /// # Errors
    ///
    /// An unsupported `time_unit` fails with
    /// [`AggregationError::InvalidArgument`] before any provider or HTTP
    /// request is made.
    pub async fn get_balance_since_x_time(
        &self,
        time_unit: &str,
        count: u32,
        query: &HistoryQuery,
    ) -> Result<AggregationResult, BalanceHistoryError> {
        let unit = time_unit.parse::<TimeUnit>()?;
        self.aggregate(unit, count, query).await
    }

    async fn aggregate(
        &self,
        unit: TimeUnit,
        count: u32,
        query: &HistoryQuery,
    ) -> Result<AggregationResult, BalanceHistoryError> {
        let fetcher = self.fetcher(&query.etherscan_api_key, &query.provider_url)?;
        let aggregator = BalanceAggregator::from_config(fetcher, &self.config);

        let result = aggregator
            .aggregate_over(query.contract_address, query.user_address, unit, count)
            .await?;
        Ok(result)
    }

    fn fetcher(
        &self,
        etherscan_api_key: &str,
        provider_url: &str,
    ) -> Result<BalanceFetcher, BalanceHistoryError> {
        let (explorer, source) = match &self.upstreams {
            Some(upstreams) => (
                Arc::clone(&upstreams.explorer),
                Arc::clone(&upstreams.source),
            ),
            None => self.connect(etherscan_api_key, provider_url)?,
        };

        let resolver = BlockResolver::from_config(explorer, Arc::clone(&self.cache), &self.config);

        Ok(BalanceFetcher::from_config(
            resolver,
            source,
            Arc::clone(&self.cache),
            &self.config,
        ))
    }

    fn connect(
        &self,
        etherscan_api_key: &str,
        provider_url: &str,
    ) -> Result<(Arc<dyn BlockExplorer>, Arc<dyn TokenBalanceSource>), BalanceHistoryError> {
        let explorer_url = Url::parse(&self.config.explorer_url).map_err(|e| {
            AggregationError::invalid_argument(
                "explorer_url",
                format!("{}: {e}", self.config.explorer_url),
            )
        })?;
        let explorer: Arc<dyn BlockExplorer> = Arc::new(
            EtherscanClient::new(self.http.clone(), explorer_url, etherscan_api_key)
                .with_timeout(self.config.request_timeout),
        );

        let provider = create_http_provider(ProviderConfig::new(provider_url))?;
        let source: Arc<dyn TokenBalanceSource> =
            Arc::new(Erc20BalanceSource::new(provider, provider_url));

        Ok((explorer, source))
    }
}
