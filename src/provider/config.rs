// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use balancescan::provider::ProviderConfig;
///
/// let config = ProviderConfig::new("https://eth.llamarpc.com");
/// assert_eq!(config.url, "https://eth.llamarpc.com");
/// ```
///
/// Note: RPC request/response logging is handled natively by alloy's transport
/// layer at DEBUG/TRACE level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("http://localhost:8545")
    }
}

/// Preset configurations for common RPC providers
impl ProviderConfig {
    /// Configuration preset for Infura
    #[must_use]
    pub fn infura(project_id: &str, network: &str) -> Self {
        Self::new(format!("https://{network}.infura.io/v3/{project_id}"))
    }

    /// Configuration preset for Alchemy
    #[must_use]
    pub fn alchemy(api_key: &str, network: &str) -> Self {
        Self::new(format!("https://{network}.g.alchemy.com/v2/{api_key}"))
    }
}
