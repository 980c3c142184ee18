// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sequential, paced aggregation of historical balances

use std::time::Duration;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use tracing::{debug, info, Instrument};

use super::{AggregationResult, BalancePoint, TimeUnit};
use crate::balance::BalanceFetcher;
use crate::config::constants::DEFAULT_PACING_DELAY;
use crate::config::BalanceHistoryConfig;
use crate::errors::AggregationError;
use crate::tracing::spans;
use crate::types::timestamp::UnixTimestamp;

/// Collects a holder's balance at `count_back + 1` checkpoints and averages them
///
/// Point 0 is taken at the current second. Point `i` is the close of the
/// period `i` units back (see [`TimeUnit::end_of_period`]). Lookups run one
/// at a time with a fixed pause after each, including the last.
///
/// # Examples
///
/// ```rust,ignore
/// let aggregator = BalanceAggregator::new(fetcher);
/// let result = aggregator.aggregate(usdc, holder, "days", 7).await?;
/// assert_eq!(result.balances.len(), 8);
/// ```
pub struct BalanceAggregator {
    fetcher: BalanceFetcher,
    pacing_delay: Duration,
}

impl BalanceAggregator {
    /// Creates an aggregator with the default pacing delay
    pub fn new(fetcher: BalanceFetcher) -> Self {
        Self {
            fetcher,
            pacing_delay: DEFAULT_PACING_DELAY,
        }
    }

    /// Creates an aggregator using the pacing delay from `config`
    pub fn from_config(fetcher: BalanceFetcher, config: &BalanceHistoryConfig) -> Self {
        Self::new(fetcher).with_pacing_delay(config.pacing_delay)
    }

    /// Sets the pause after each lookup
    pub fn with_pacing_delay(mut self, pacing_delay: Duration) -> Self {
        self.pacing_delay = pacing_delay;
        self
    }

    /// The underlying balance fetcher
    pub fn fetcher(&self) -> &BalanceFetcher {
        &self.fetcher
    }

    /// Aggregates over a time unit given by name
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidArgument`] for an unsupported unit
    /// before any lookup is made; otherwise see [`Self::aggregate_at`].
    pub async fn aggregate(
        &self,
        contract: Address,
        holder: Address,
        time_unit: &str,
        count_back: u32,
    ) -> Result<AggregationResult, AggregationError> {
        let unit = time_unit.parse::<TimeUnit>()?;
        self.aggregate_over(contract, holder, unit, count_back).await
    }

    /// Aggregates `count_back` periods of `unit` ending now
    pub async fn aggregate_over(
        &self,
        contract: Address,
        holder: Address,
        unit: TimeUnit,
        count_back: u32,
    ) -> Result<AggregationResult, AggregationError> {
        self.aggregate_at(contract, holder, unit, count_back, Utc::now())
            .await
    }

    /// Aggregates `count_back` periods of `unit` ending at `now`
    ///
    /// All-or-nothing: the first failed lookup aborts the whole aggregation.
    ///
    /// # Errors
    ///
    /// - [`AggregationError::Balance`] if any lookup fails
    /// - [`AggregationError::Timestamp`] if a checkpoint is out of range
    /// - [`AggregationError::PartialFailure`] if fewer points than requested were collected
    pub async fn aggregate_at(
        &self,
        contract: Address,
        holder: Address,
        unit: TimeUnit,
        count_back: u32,
        now: DateTime<Utc>,
    ) -> Result<AggregationResult, AggregationError> {
        async move {
            let requested = count_back.saturating_add(1);

            // Checkpoints move back monotonically, so an in-range oldest point
            // means every point is in range
            if count_back > 0 {
                unit.end_of_period(now, count_back)?;
            }

            let mut balances = Vec::new();
            let mut retrieved = 0u32;

            for i in 0..=count_back {
                let timestamp = if i == 0 {
                    UnixTimestamp::from_datetime(now)
                } else {
                    UnixTimestamp::from_datetime(unit.end_of_period(now, i)?)
                };

                let balance = self
                    .fetcher
                    .fetch_balance(contract, holder, timestamp)
                    .await?;
                debug!(index = i, timestamp = %timestamp, balance = %balance, "Collected balance point");

                balances.push(BalancePoint::new(timestamp, balance));
                retrieved += 1;

                tokio::time::sleep(self.pacing_delay).await;
            }

            if retrieved.checked_sub(1) != Some(count_back) {
                return Err(AggregationError::partial_failure(requested, retrieved));
            }

            let result = AggregationResult::from_points(balances)?;
            info!(
                points = result.len(),
                average_balance = %result.average_balance,
                "Completed balance aggregation"
            );
            Ok(result)
        }
        .instrument(spans::aggregate(contract, holder, unit, count_back))
        .await
    }
}
