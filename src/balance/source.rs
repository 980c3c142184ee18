// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-20 balance and decimals reads over an RPC provider

use alloy_eips::BlockId;
use alloy_primitives::{Address, BlockNumber};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::debug;

use crate::errors::RpcError;
use crate::types::tokens::{TokenAmount, TokenDecimals};

sol! {
    /// Minimal ERC-20 read interface
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}

/// Source of raw token balances and decimals
///
/// The seam between the [`BalanceFetcher`](crate::BalanceFetcher) and the
/// chain. Implementations perform exactly one upstream read per call and do
/// not retry.
#[async_trait]
pub trait TokenBalanceSource: Send + Sync {
    /// Raw (unscaled) balance of `holder` on `token` at `block`
    async fn balance_of(
        &self,
        token: Address,
        holder: Address,
        block: BlockNumber,
    ) -> Result<TokenAmount, RpcError>;

    /// Decimal count of `token`
    async fn decimals(&self, token: Address) -> Result<TokenDecimals, RpcError>;

    /// Endpoint URL this source reads from; part of the balance cache key
    fn endpoint(&self) -> &str;
}

/// [`TokenBalanceSource`] backed by an alloy [`Provider`]
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::provider::{create_http_provider, ProviderConfig};
/// use balancescan::Erc20BalanceSource;
///
/// let url = "https://eth.llamarpc.com";
/// let provider = create_http_provider(ProviderConfig::new(url))?;
/// let source = Erc20BalanceSource::new(provider, url);
/// ```
#[derive(Debug, Clone)]
pub struct Erc20BalanceSource<P> {
    provider: P,
    endpoint: String,
}

impl<P: Provider> Erc20BalanceSource<P> {
    /// Wraps a provider; `endpoint` is the URL the provider was built from
    pub fn new(provider: P, endpoint: impl Into<String>) -> Self {
        Self {
            provider,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl<P: Provider + 'static> TokenBalanceSource for Erc20BalanceSource<P> {
    async fn balance_of(
        &self,
        token: Address,
        holder: Address,
        block: BlockNumber,
    ) -> Result<TokenAmount, RpcError> {
        let contract = IERC20::new(token, &self.provider);
        let balance = contract
            .balanceOf(holder)
            .block(BlockId::number(block))
            .call()
            .await
            .map_err(|e| RpcError::call_failed(format!("balanceOf at block {block}"), e))?;

        debug!(token = %token, holder = %holder, block_number = block, balance = %balance, "Fetched raw balance");
        Ok(TokenAmount::new(balance))
    }

    async fn decimals(&self, token: Address) -> Result<TokenDecimals, RpcError> {
        let contract = IERC20::new(token, &self.provider);
        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| RpcError::call_failed(format!("decimals of {token}"), e))?;

        Ok(TokenDecimals::new(decimals))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
