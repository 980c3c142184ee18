// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for BalanceAggregator checkpoints, averaging and failure handling
//!
//! The mock explorer echoes each timestamp back as the block number, so the
//! block a balance was read at identifies the checkpoint it belongs to.

mod helpers;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use balancescan::{
    AggregationError, BalanceAggregator, BalanceFetchError, BlockResolutionError, ExplorerResponse,
    MemoryCache, TimeUnit, UnixTimestamp,
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};
use helpers::{fetcher, MockBalanceSource, MockExplorer};

const TOKEN: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
const HOLDER: Address = address!("28c6c06298d514db089934071355e5743bf21d60");

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
}

fn aggregator(explorer: Arc<MockExplorer>, source: Arc<MockBalanceSource>) -> BalanceAggregator {
    BalanceAggregator::new(fetcher(explorer, source, Arc::new(MemoryCache::new())))
        .with_pacing_delay(Duration::ZERO)
}

/// Six-decimal token whose raw balance at block `b` is `(b % 100)` tokens plus dust
fn block_keyed_source() -> MockBalanceSource {
    MockBalanceSource::from_fn(
        |block| U256::from(block % 100) * U256::from(1_000_000u64) + U256::from(123u64),
        6,
    )
}

#[tokio::test]
async fn test_two_days_back_yields_three_end_of_day_points() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    let source = Arc::new(block_keyed_source());
    let aggregator = aggregator(explorer.clone(), source.clone());

    let result = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Days, 2, now())
        .await
        .unwrap();

    let timestamps: Vec<_> = result.balances.iter().map(|p| p.timestamp).collect();
    assert_eq!(
        timestamps,
        vec![
            UnixTimestamp(1710498600), // 2024-03-15T10:30:00Z (now)
            UnixTimestamp(1710460799), // 2024-03-14T23:59:59Z
            UnixTimestamp(1710374399), // 2024-03-13T23:59:59Z
        ]
    );

    let balances: Vec<_> = result.balances.iter().map(|p| p.balance).collect();
    assert_eq!(
        balances,
        vec![U256::from(0u8), U256::from(99u8), U256::from(99u8)]
    );
    assert_eq!(result.average_balance, BigDecimal::from(66u32));

    assert_eq!(explorer.requested(), timestamps);
    assert_eq!(source.decimals_calls(), 1);
}

#[tokio::test]
async fn test_every_unit_returns_count_back_plus_one_points_most_recent_first() {
    for unit in TimeUnit::ALL {
        let explorer = Arc::new(MockExplorer::echo_timestamp());
        let source = Arc::new(block_keyed_source());
        let aggregator = aggregator(explorer, source);

        let result = aggregator
            .aggregate_at(TOKEN, HOLDER, unit, 4, now())
            .await
            .unwrap();

        assert_eq!(result.balances.len(), 5, "unit {unit}");
        assert_eq!(result.balances[0].timestamp, UnixTimestamp::from_datetime(now()));
        assert!(
            result
                .balances
                .windows(2)
                .all(|pair| pair[0].timestamp > pair[1].timestamp),
            "unit {unit} must be ordered most recent first"
        );
    }
}

#[tokio::test]
async fn test_monthly_checkpoints_close_each_month() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    let aggregator = aggregator(explorer, Arc::new(block_keyed_source()));

    let result = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Months, 2, now())
        .await
        .unwrap();

    let closes: Vec<_> = result.balances[1..]
        .iter()
        .map(|p| p.timestamp.to_datetime().unwrap())
        .collect();
    assert_eq!(
        closes,
        vec![
            Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_zero_count_back_is_a_single_current_point() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    let source = Arc::new(MockBalanceSource::constant(U256::from(7_000_000u64), 6));
    let aggregator = aggregator(explorer, source);

    let result = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Years, 0, now())
        .await
        .unwrap();

    assert_eq!(result.balances.len(), 1);
    assert_eq!(result.average_balance, BigDecimal::from(7u32));
}

#[tokio::test]
async fn test_average_is_exact_mean() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    // Blocks 1710498600, 1710496799, 1710493199 map to 1, 2, 2
    let source = Arc::new(MockBalanceSource::from_fn(
        |block| if block % 100 == 0 { U256::from(1u8) } else { U256::from(2u8) },
        0,
    ));
    let aggregator = aggregator(explorer, source);

    let result = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Hours, 2, now())
        .await
        .unwrap();

    // (1 + 2 + 2) / 3
    let expected = BigDecimal::from(5u32) / BigDecimal::from(3u32);
    assert_eq!(result.average_balance, expected);
    assert!(result.average_balance > BigDecimal::from_str("1.666").unwrap());
}

#[tokio::test]
async fn test_unsupported_unit_fails_before_any_lookup() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    let source = Arc::new(block_keyed_source());
    let aggregator = aggregator(explorer.clone(), source.clone());

    let err = aggregator
        .aggregate(TOKEN, HOLDER, "weeks", 3)
        .await
        .unwrap_err();

    assert!(matches!(err, AggregationError::InvalidArgument { .. }));
    assert!(err.to_string().contains("unknown time unit weeks"));
    assert_eq!(explorer.calls(), 0);
    assert_eq!(source.balance_calls(), 0);
    assert_eq!(source.decimals_calls(), 0);
}

#[tokio::test]
async fn test_supported_unit_by_name() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    let aggregator = aggregator(explorer.clone(), Arc::new(block_keyed_source()));

    let result = aggregator.aggregate(TOKEN, HOLDER, "hours", 1).await.unwrap();

    assert_eq!(result.balances.len(), 2);
    assert_eq!(explorer.calls(), 2);
}

#[tokio::test]
async fn test_failed_lookup_aborts_whole_aggregation() {
    // Second checkpoint is rejected; no partial result comes back
    let explorer = Arc::new(MockExplorer::echo_timestamp().with_script(vec![
        helpers::success_reply("1"),
        ExplorerResponse::permanent("HTTP 403"),
    ]));
    let source = Arc::new(block_keyed_source());
    let aggregator = aggregator(explorer.clone(), source.clone());

    let err = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Days, 3, now())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AggregationError::Balance(BalanceFetchError::Resolution(
            BlockResolutionError::Rejected { .. }
        ))
    ));
    assert_eq!(explorer.calls(), 2);
    assert_eq!(source.balance_calls(), 1);
}

#[tokio::test]
async fn test_out_of_range_count_back_fails_before_any_lookup() {
    for unit in TimeUnit::ALL {
        let explorer = Arc::new(MockExplorer::echo_timestamp());
        let source = Arc::new(block_keyed_source());
        let aggregator = aggregator(explorer.clone(), source.clone());

        let err = aggregator
            .aggregate_at(TOKEN, HOLDER, unit, u32::MAX, now())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AggregationError::Timestamp { .. }),
            "unit {unit}: {err:?}"
        );
        assert_eq!(explorer.calls(), 0, "unit {unit}");
        assert_eq!(source.balance_calls(), 0, "unit {unit}");
    }
}

#[tokio::test]
async fn test_block_not_found_aborts_aggregation() {
    let explorer = Arc::new(MockExplorer::always(helpers::success_reply("")));
    let aggregator = aggregator(explorer, Arc::new(block_keyed_source()));

    let err = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Days, 1, now())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AggregationError::Balance(BalanceFetchError::BlockNotFound { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_pacing_delay_follows_every_lookup() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    let aggregator = BalanceAggregator::new(fetcher(
        explorer,
        Arc::new(block_keyed_source()),
        Arc::new(MemoryCache::new()),
    ));

    let started = tokio::time::Instant::now();
    aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Days, 2, now())
        .await
        .unwrap();

    // Three lookups, each followed by the default 200ms pause
    assert!(started.elapsed() >= Duration::from_millis(600));
}

#[tokio::test]
async fn test_repeated_aggregation_is_served_from_cache() {
    let explorer = Arc::new(MockExplorer::echo_timestamp());
    let source = Arc::new(block_keyed_source());
    let aggregator = aggregator(explorer.clone(), source.clone());

    let first = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Days, 3, now())
        .await
        .unwrap();
    let second = aggregator
        .aggregate_at(TOKEN, HOLDER, TimeUnit::Days, 3, now())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(explorer.calls(), 4);
    assert_eq!(source.balance_calls(), 4);
}
