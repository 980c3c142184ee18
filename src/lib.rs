// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Historical ERC-20 balances and their averages over time.
//!
//! A balance lookup at a past timestamp runs in three steps:
//!
//! 1. [`BlockResolver`] maps the timestamp to the latest block at or before it
//!    through a block explorer, retrying transient failures.
//! 2. [`BalanceFetcher`] reads `balanceOf` at that block and scales it by the
//!    token's decimals.
//! 3. [`BalanceAggregator`] repeats the lookup at calendar-aligned
//!    checkpoints and averages the results.
//!
//! Block numbers, balances and decimals are read through a shared
//! [`CacheStore`] before any network call.
//!
//! ```rust,ignore
//! use balancescan::{BalanceHistoryClient, HistoryQuery};
//!
//! let client = BalanceHistoryClient::with_memory_cache();
//! let query = HistoryQuery::new(token, holder, etherscan_api_key, rpc_url);
//!
//! let result = client.get_balance_since_x_days(2, &query).await?;
//! assert_eq!(result.balances.len(), 3);
//! ```

pub mod balance;
pub mod blocks;
pub mod cache;
mod client;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod history;
pub mod provider;
mod tracing;
pub mod types;

pub use balance::{BalanceFetcher, Erc20BalanceSource, TokenBalanceSource};
pub use blocks::BlockResolver;
pub use cache::{
    CacheKey, CacheStats, CacheStore, CacheStoreExt, DiskCache, MemoryCache, NoOpCache,
};
pub use client::{BalanceHistoryClient, HistoryQuery};
pub use config::{BalanceHistoryConfig, BalanceHistoryConfigBuilder};
pub use errors::{
    AggregationError, BalanceFetchError, BalanceHistoryError, BlockResolutionError, CacheError,
    RpcError,
};
pub use explorer::{BlockExplorer, EtherscanClient, ExplorerReply, ExplorerResponse};
pub use history::{AggregationResult, BalanceAggregator, BalancePoint, TimeUnit};
pub use types::timestamp::UnixTimestamp;
pub use types::tokens::{TokenAmount, TokenDecimals};
