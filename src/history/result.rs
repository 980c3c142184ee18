// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Aggregation result types

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::errors::AggregationError;
use crate::types::timestamp::UnixTimestamp;

/// A holder's whole-token balance at one checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// Checkpoint time (UTC seconds)
    pub timestamp: UnixTimestamp,
    /// Balance in whole tokens, remainder discarded
    pub balance: U256,
}

impl BalancePoint {
    /// Create a new balance point
    pub const fn new(timestamp: UnixTimestamp, balance: U256) -> Self {
        Self { timestamp, balance }
    }
}

/// Balances over a window of periods and their mean
///
/// `balances[0]` is the most recent point; higher indices go further back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Arithmetic mean of every point's balance
    pub average_balance: BigDecimal,
    /// Points ordered most recent first
    pub balances: Vec<BalancePoint>,
}

impl AggregationResult {
    /// Builds a result from collected points, computing the mean in decimal
    ///
    /// The sum is exact; the division is carried out to `BigDecimal`'s
    /// default precision. An empty input averages to zero.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::Conversion`] if a balance cannot be
    /// represented as a decimal.
    pub fn from_points(balances: Vec<BalancePoint>) -> Result<Self, AggregationError> {
        if balances.is_empty() {
            return Ok(Self {
                average_balance: BigDecimal::from(0u32),
                balances,
            });
        }

        let mut sum = BigDecimal::from(0u32);
        for point in &balances {
            sum += u256_to_bigdecimal(point.balance)?;
        }

        let count = BigDecimal::from(balances.len() as u64);
        Ok(Self {
            average_balance: sum / count,
            balances,
        })
    }

    /// Number of points collected
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Whether no points were collected
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

fn u256_to_bigdecimal(value: U256) -> Result<BigDecimal, AggregationError> {
    BigDecimal::from_str(&value.to_string()).map_err(|e| {
        AggregationError::conversion(format!("Failed to convert balance {value} to BigDecimal: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ts: i64, balance: u64) -> BalancePoint {
        BalancePoint::new(UnixTimestamp(ts), U256::from(balance))
    }

    #[test]
    fn test_average_of_three_points() {
        let result =
            AggregationResult::from_points(vec![point(3, 6), point(2, 3), point(1, 0)]).unwrap();
        assert_eq!(result.average_balance, BigDecimal::from(3u32));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_average_keeps_fraction() {
        let result = AggregationResult::from_points(vec![point(2, 5), point(1, 2)]).unwrap();
        assert_eq!(result.average_balance, BigDecimal::from_str("3.5").unwrap());
    }

    #[test]
    fn test_average_of_huge_balances_is_exact() {
        let result = AggregationResult::from_points(vec![
            BalancePoint::new(UnixTimestamp(2), U256::MAX),
            BalancePoint::new(UnixTimestamp(1), U256::MAX),
        ])
        .unwrap();
        assert_eq!(
            result.average_balance,
            BigDecimal::from_str(&U256::MAX.to_string()).unwrap()
        );
    }

    #[test]
    fn test_empty_points_average_to_zero() {
        let result = AggregationResult::from_points(Vec::new()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.average_balance, BigDecimal::from(0u32));
    }

    #[test]
    fn test_result_serializes_points_in_order() {
        let result = AggregationResult::from_points(vec![point(20, 1), point(10, 1)]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["balances"][0]["timestamp"], 20);
        assert_eq!(json["balances"][1]["timestamp"], 10);
    }
}
