// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for historical balance lookups.

use super::{BlockResolutionError, RpcError};
use crate::types::timestamp::UnixTimestamp;

/// Errors that can occur while fetching a balance at a past timestamp.
///
/// `BlockNotFound` is distinct from a resolution failure: the explorer
/// answered successfully but had no block for the timestamp, which usually
/// means the timestamp predates the chain's data.
#[derive(Debug, thiserror::Error)]
pub enum BalanceFetchError {
    /// The timestamp resolved to no usable block.
    #[error("Failed to retrieve block number for timestamp {timestamp}")]
    BlockNotFound {
        /// The timestamp that produced an empty result
        timestamp: UnixTimestamp,
    },

    /// Timestamp to block resolution failed.
    #[error("Block resolution error: {0}")]
    Resolution(#[from] BlockResolutionError),

    /// RPC error when reading the token contract.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl BalanceFetchError {
    /// Create a `BlockNotFound` error for a timestamp.
    pub fn block_not_found(timestamp: UnixTimestamp) -> Self {
        BalanceFetchError::BlockNotFound { timestamp }
    }
}
