//! Default values and well-known constants
//!
//! This module centralizes the magic numbers used throughout the balancescan
//! crate, improving discoverability and maintainability.

use std::time::Duration;

/// Block explorer defaults
pub mod explorer {
    use super::*;

    /// Etherscan-compatible API endpoint used when none is configured
    pub const DEFAULT_EXPLORER_URL: &str = "https://api.etherscan.io/api";

    /// Re-attempts after the first failed block lookup
    pub const DEFAULT_MAX_RETRIES: u32 = 5;

    /// Fixed delay between block lookup attempts
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);

    /// Timeout for a single explorer HTTP request
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Explorer status flag marking a successful response
    pub const STATUS_OK: &str = "1";
}

/// Cache lifetimes
pub mod ttl {
    use super::*;

    /// Timestamp to block mappings
    pub const BLOCK_LOOKUP: Duration = Duration::from_secs(60 * 60);

    /// Scaled balances
    pub const BALANCE: Duration = Duration::from_secs(60 * 60);

    /// Token decimals (immutable for a deployed token)
    pub const TOKEN_DECIMALS: Duration = Duration::from_secs(60 * 60 * 24 * 30);
}

/// Delay after every aggregation step, courtesy to upstream rate limits
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(200);
