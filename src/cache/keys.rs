// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache key derivation
//!
//! Keys are content-addressed by their full input tuple, so stale inputs
//! simply produce different keys and no invalidation is ever needed.

use alloy_primitives::{hex, keccak256, Address};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::timestamp::UnixTimestamp;

/// Opaque cache key
///
/// # Examples
///
/// ```
/// use balancescan::{CacheKey, UnixTimestamp};
///
/// let key = CacheKey::block_lookup(UnixTimestamp(1609459200));
/// assert_eq!(key.as_str(), "tsBlock_1609459200");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wraps an arbitrary key string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for a timestamp to block mapping
    ///
    /// Only the timestamp is part of the key: the mapping is the same for
    /// every contract and holder on the configured chain.
    pub fn block_lookup(timestamp: UnixTimestamp) -> Self {
        Self(format!("tsBlock_{timestamp}"))
    }

    /// Key for a scaled balance
    ///
    /// The provider URL is part of the key so two endpoints (possibly on
    /// different networks) never share an entry.
    pub fn balance(
        contract: Address,
        holder: Address,
        timestamp: UnixTimestamp,
        provider_url: &str,
    ) -> Self {
        let preimage = format!("balance_{contract}_{holder}_{timestamp}_{provider_url}");
        Self(format!("balance_{}", hex::encode(keccak256(preimage.as_bytes()))))
    }

    /// Key for a token's decimals, keyed by contract only
    pub fn token_decimals(contract: Address) -> Self {
        Self(format!("token_decimal_{contract}"))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
