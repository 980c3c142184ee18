// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the balancescan library.
//!
//! This module follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling
//!   ([`BlockResolutionError`], [`BalanceFetchError`], [`AggregationError`])
//! - **Unified error type** ([`BalanceHistoryError`]) returned by the public
//!   entry points on [`BalanceHistoryClient`](crate::BalanceHistoryClient)
//!
//! Additionally, [`RpcError`] covers provider failures and [`CacheError`]
//! covers cache backend failures.
//!
//! # Examples
//!
//! ```rust,ignore
//! use balancescan::{AggregationError, BalanceHistoryError};
//!
//! match client.get_balance_since_x_days(7, &query).await {
//!     Ok(result) => println!("Average: {}", result.average_balance),
//!     Err(BalanceHistoryError::Aggregation(AggregationError::PartialFailure { .. })) => {
//!         // retry the whole operation
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod aggregation;
mod balance;
mod cache;
mod resolution;
mod rpc;

pub use aggregation::AggregationError;
pub use balance::BalanceFetchError;
pub use cache::CacheError;
pub use resolution::BlockResolutionError;
pub use rpc::RpcError;

/// Unified error type for all balancescan operations.
///
/// All module-specific error types convert into `BalanceHistoryError` via
/// `From`, so `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum BalanceHistoryError {
    /// Error from timestamp to block resolution.
    #[error("Block resolution error: {0}")]
    Resolution(#[from] BlockResolutionError),

    /// Error from a single historical balance lookup.
    #[error("Balance fetch error: {0}")]
    Balance(#[from] BalanceFetchError),

    /// Error from time-series aggregation.
    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),

    /// Error from the RPC provider.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from a cache backend.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}
