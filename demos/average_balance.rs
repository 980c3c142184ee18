// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// Example computing a holder's average token balance over recent periods
///
/// This example shows how to:
/// 1. Build a BalanceHistoryClient backed by a persistent disk cache
/// 2. Look up a single historical balance
/// 3. Average the balance over the last N days (or another unit)
/// 4. Inspect cache statistics after repeated queries
///
/// Run with:
/// ```bash
/// RPC_URL=https://eth.llamarpc.com \
/// ETHERSCAN_API_KEY=your_api_key \
/// TOKEN_ADDRESS=0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48 \
/// HOLDER_ADDRESS=0x28c6c06298d514db089934071355e5743bf21d60 \
/// TIME_UNIT=days \
/// COUNT_BACK=7 \
/// CACHE_PATH=balance_cache.json \
/// RUST_LOG=balancescan=debug \
/// cargo run --example average_balance
/// ```
use std::env;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use balancescan::{BalanceHistoryClient, HistoryQuery, UnixTimestamp};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    // Read configuration from environment
    let rpc_url = env::var("RPC_URL").context("RPC_URL environment variable not set")?;
    let api_key =
        env::var("ETHERSCAN_API_KEY").context("ETHERSCAN_API_KEY environment variable not set")?;
    let token: Address = env::var("TOKEN_ADDRESS")
        .context("TOKEN_ADDRESS environment variable not set")?
        .parse()
        .context("Failed to parse TOKEN_ADDRESS")?;
    let holder: Address = env::var("HOLDER_ADDRESS")
        .context("HOLDER_ADDRESS environment variable not set")?
        .parse()
        .context("Failed to parse HOLDER_ADDRESS")?;
    let time_unit = env::var("TIME_UNIT").unwrap_or_else(|_| "days".to_string());
    let count_back: u32 = env::var("COUNT_BACK")
        .unwrap_or_else(|_| "7".to_string())
        .parse()
        .context("Failed to parse COUNT_BACK")?;
    let cache_path = env::var("CACHE_PATH").unwrap_or_else(|_| "balance_cache.json".to_string());

    info!(%token, %holder, time_unit, count_back, cache_path, "Starting average balance example");

    let client = BalanceHistoryClient::with_disk_cache(&cache_path)?;

    // Single point-in-time lookup
    let now = UnixTimestamp::now();
    let current = client
        .get_balance_history(token, holder, now.as_i64(), &api_key, &rpc_url)
        .await?;
    println!("Balance at {now}: {current}");

    // Time-series aggregation
    let query = HistoryQuery::new(token, holder, api_key, rpc_url);
    let result = client
        .get_balance_since_x_time(&time_unit, count_back, &query)
        .await?;

    println!("\n=== Balance History ({count_back} {time_unit} back) ===");
    for point in &result.balances {
        let when = point
            .timestamp
            .to_datetime()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| point.timestamp.to_string());
        println!("{when}: {}", point.balance);
    }
    println!("Average balance: {}", result.average_balance);

    let stats = client.cache_stats().await;
    println!("\nCache: {stats}");

    Ok(())
}
