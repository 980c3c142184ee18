// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for balancescan operations
//!
//! This module controls cache lifetimes, block explorer retry behavior and
//! the pacing between historical lookups.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use balancescan::BalanceHistoryConfig;
//!
//! // 1h block/balance caches, 30 day decimals cache, 5 retries 2s apart
//! let config = BalanceHistoryConfig::default();
//! assert_eq!(config.max_retries, 5);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use balancescan::BalanceHistoryConfigBuilder;
//! use std::time::Duration;
//!
//! let config = BalanceHistoryConfigBuilder::with_defaults()
//!     .explorer_url("https://api-sepolia.etherscan.io/api")
//!     .pacing_delay(Duration::from_millis(500))
//!     .build();
//! ```

use std::time::Duration;

pub mod constants;

use constants::{explorer, ttl, DEFAULT_PACING_DELAY};

/// Configuration for balance history operations
///
/// Use [`BalanceHistoryConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct BalanceHistoryConfig {
    /// How long a timestamp to block mapping stays cached
    /// Default: 1 hour
    pub block_cache_ttl: Duration,

    /// How long a scaled balance stays cached
    /// Default: 1 hour
    pub balance_cache_ttl: Duration,

    /// How long a token's decimals stay cached
    /// Default: 30 days
    pub decimals_cache_ttl: Duration,

    /// Re-attempts after the first failed block lookup
    /// Default: 5
    pub max_retries: u32,

    /// Fixed delay between block lookup attempts
    /// Default: 2000ms
    pub retry_delay: Duration,

    /// Delay applied after every aggregation step, including the last
    /// Default: 200ms
    pub pacing_delay: Duration,

    /// Block explorer API endpoint
    pub explorer_url: String,

    /// Timeout for a single explorer HTTP request
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl Default for BalanceHistoryConfig {
    fn default() -> Self {
        Self {
            block_cache_ttl: ttl::BLOCK_LOOKUP,
            balance_cache_ttl: ttl::BALANCE,
            decimals_cache_ttl: ttl::TOKEN_DECIMALS,
            max_retries: explorer::DEFAULT_MAX_RETRIES,
            retry_delay: explorer::DEFAULT_RETRY_DELAY,
            pacing_delay: DEFAULT_PACING_DELAY,
            explorer_url: explorer::DEFAULT_EXPLORER_URL.to_string(),
            request_timeout: explorer::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl BalanceHistoryConfig {
    /// Create minimal config with no delays
    ///
    /// Cache lifetimes and the retry budget are unchanged; only the retry and
    /// pacing delays are zeroed. Suitable for testing or premium endpoints
    /// with generous rate limits.
    ///
    /// # Example
    ///
    /// ```rust
    /// use balancescan::BalanceHistoryConfig;
    /// use std::time::Duration;
    ///
    /// let config = BalanceHistoryConfig::minimal();
    /// assert_eq!(config.pacing_delay, Duration::ZERO);
    /// assert_eq!(config.max_retries, 5);
    /// ```
    pub fn minimal() -> Self {
        Self {
            retry_delay: Duration::ZERO,
            pacing_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Builder for [`BalanceHistoryConfig`]
///
/// # Example
///
/// ```rust
/// use balancescan::BalanceHistoryConfigBuilder;
/// use std::time::Duration;
///
/// let config = BalanceHistoryConfigBuilder::new()
///     .max_retries(3)
///     .retry_delay(Duration::from_millis(500))
///     .build();
/// assert_eq!(config.max_retries, 3);
/// ```
pub struct BalanceHistoryConfigBuilder {
    config: BalanceHistoryConfig,
}

impl Default for BalanceHistoryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceHistoryConfigBuilder {
    /// Create a new builder with minimal (delay-free) defaults
    pub fn new() -> Self {
        Self {
            config: BalanceHistoryConfig::minimal(),
        }
    }

    /// Start with the production defaults
    pub fn with_defaults() -> Self {
        Self {
            config: BalanceHistoryConfig::default(),
        }
    }

    /// Set the timestamp to block cache lifetime
    pub fn block_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.block_cache_ttl = ttl;
        self
    }

    /// Set the balance cache lifetime
    pub fn balance_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.balance_cache_ttl = ttl;
        self
    }

    /// Set the token decimals cache lifetime
    pub fn decimals_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.decimals_cache_ttl = ttl;
        self
    }

    /// Set the number of re-attempts after a failed block lookup
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the delay between block lookup attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the delay applied after every aggregation step
    pub fn pacing_delay(mut self, delay: Duration) -> Self {
        self.config.pacing_delay = delay;
        self
    }

    /// Set the block explorer API endpoint
    pub fn explorer_url(mut self, url: impl Into<String>) -> Self {
        self.config.explorer_url = url.into();
        self
    }

    /// Set the explorer request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> BalanceHistoryConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BalanceHistoryConfig::default();
        assert_eq!(config.block_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.balance_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.decimals_cache_ttl, Duration::from_secs(2_592_000));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_delay, Duration::from_millis(2000));
        assert_eq!(config.pacing_delay, Duration::from_millis(200));
        assert_eq!(config.explorer_url, "https://api.etherscan.io/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_minimal_config_only_zeroes_delays() {
        let config = BalanceHistoryConfig::minimal();
        assert_eq!(config.retry_delay, Duration::ZERO);
        assert_eq!(config.pacing_delay, Duration::ZERO);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.block_cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_builder_overrides() {
        let config = BalanceHistoryConfigBuilder::with_defaults()
            .block_cache_ttl(Duration::from_secs(60))
            .balance_cache_ttl(Duration::from_secs(120))
            .decimals_cache_ttl(Duration::from_secs(180))
            .max_retries(2)
            .retry_delay(Duration::from_millis(10))
            .pacing_delay(Duration::from_millis(20))
            .explorer_url("http://localhost:8080/api")
            .request_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.block_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.balance_cache_ttl, Duration::from_secs(120));
        assert_eq!(config.decimals_cache_ttl, Duration::from_secs(180));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_delay, Duration::from_millis(10));
        assert_eq!(config.pacing_delay, Duration::from_millis(20));
        assert_eq!(config.explorer_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_new_starts_minimal() {
        let config = BalanceHistoryConfigBuilder::new().build();
        assert_eq!(config.pacing_delay, Duration::ZERO);
        assert_eq!(config.retry_delay, Duration::ZERO);
    }
}
