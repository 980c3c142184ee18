// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_provider::{ProviderBuilder, RootProvider};

use crate::errors::RpcError;

use super::config::ProviderConfig;

/// Create an HTTP provider for the configured endpoint
///
/// Recommended fillers are disabled: the crate only issues read-only
/// `eth_call`s, so a bare [`RootProvider`] is enough.
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(
///     ProviderConfig::new("https://eth.llamarpc.com")
/// )?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<RootProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(url))
}
