// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for blockchain provider operations.
//!
//! Transport failures from the RPC provider are surfaced here without any
//! retry at the balance layer; callers decide whether to re-run the whole
//! operation.

/// Errors that can occur during blockchain RPC operations.
///
/// # Examples
///
/// ```rust
/// use balancescan::RpcError;
///
/// let error = RpcError::ProviderUrlInvalid("relative URL without a base".to_string());
/// assert!(error.to_string().contains("Invalid provider URL"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// A contract call (`balanceOf`, `decimals`) failed.
    ///
    /// This covers rate limiting, network connectivity issues, reverted
    /// calls and provider-side errors such as pruned historical state.
    #[error("RPC call failed during {operation}")]
    CallFailed {
        /// Description of the operation that failed (e.g., "balanceOf at block 100")
        operation: String,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The user-supplied provider URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `CallFailed` error from any error type.
    pub fn call_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::CallFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }
}
