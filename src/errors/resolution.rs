// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for timestamp to block resolution.
//!
//! These errors are produced by the [`BlockResolver`](crate::BlockResolver)
//! when the block explorer cannot map a timestamp to a block number.

use crate::types::timestamp::UnixTimestamp;

/// Errors that can occur while resolving a timestamp to a block number.
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::{BlockResolver, BlockResolutionError};
///
/// match resolver.resolve_block(timestamp).await {
///     Ok(Some(block)) => println!("Block: {block}"),
///     Ok(None) => println!("No block at or before {timestamp}"),
///     Err(BlockResolutionError::RetriesExhausted { attempts, .. }) => {
///         eprintln!("Explorer unavailable after {attempts} attempts");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BlockResolutionError {
    /// Every attempt failed with a transient error or a non-success status.
    #[error(
        "Failed to fetch block for timestamp {timestamp} from {endpoint} after {attempts} attempts: {last_failure}"
    )]
    RetriesExhausted {
        /// The timestamp being resolved
        timestamp: UnixTimestamp,
        /// Explorer endpoint (API key redacted)
        endpoint: String,
        /// Total number of requests issued, including the first one
        attempts: u32,
        /// Description of the last failure observed
        last_failure: String,
    },

    /// The explorer rejected the request in a way that retrying will not fix.
    #[error("Block explorer at {endpoint} rejected lookup for timestamp {timestamp}: {reason}")]
    Rejected {
        /// The timestamp being resolved
        timestamp: UnixTimestamp,
        /// Explorer endpoint (API key redacted)
        endpoint: String,
        /// Why the request was rejected
        reason: String,
    },

    /// The explorer reported success but the result is not a block number.
    #[error("Block explorer returned an invalid block number '{value}' for timestamp {timestamp}")]
    InvalidBlockNumber {
        /// The timestamp being resolved
        timestamp: UnixTimestamp,
        /// The raw result value
        value: String,
    },
}

impl BlockResolutionError {
    /// Create a `RetriesExhausted` error.
    pub fn retries_exhausted(
        timestamp: UnixTimestamp,
        endpoint: impl Into<String>,
        attempts: u32,
        last_failure: impl Into<String>,
    ) -> Self {
        BlockResolutionError::RetriesExhausted {
            timestamp,
            endpoint: endpoint.into(),
            attempts,
            last_failure: last_failure.into(),
        }
    }

    /// Create a `Rejected` error.
    pub fn rejected(
        timestamp: UnixTimestamp,
        endpoint: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BlockResolutionError::Rejected {
            timestamp,
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidBlockNumber` error.
    pub fn invalid_block_number(timestamp: UnixTimestamp, value: impl Into<String>) -> Self {
        BlockResolutionError::InvalidBlockNumber {
            timestamp,
            value: value.into(),
        }
    }
}
