// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! RPC provider construction
//!
//! Balances are read from a user-supplied RPC endpoint. This module turns that
//! URL into an alloy provider:
//! - [`ProviderConfig`] - Endpoint configuration with presets for common hosts
//! - [`create_http_provider`] - Create an HTTP provider from a configuration
//!
//! # Examples
//!
//! ```rust,ignore
//! use alloy_provider::Provider;
//! use balancescan::provider::{create_http_provider, ProviderConfig};
//!
//! let provider = create_http_provider(ProviderConfig::new("https://eth.llamarpc.com"))?;
//! let block_number = provider.get_block_number().await?;
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::create_http_provider;
