// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for balance time-series aggregation.

use super::BalanceFetchError;

/// Errors that can occur while aggregating balances over time.
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::AggregationError;
///
/// match aggregator.aggregate(token, holder, "weeks", 4).await {
///     Err(AggregationError::InvalidArgument { reason, .. }) => eprintln!("{reason}"),
///     Err(AggregationError::PartialFailure { .. }) => { /* retry the whole call */ }
///     Err(e) => eprintln!("Other error: {e}"),
///     Ok(result) => println!("Average: {}", result.average_balance),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// An argument was outside the supported set (e.g., an unknown time unit).
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        argument: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The loop finished without collecting every requested point.
    ///
    /// No partial result is returned; callers should retry the whole operation.
    #[error(
        "Failed to retrieve all balance history ({retrieved} of {requested} points), kindly retry again"
    )]
    PartialFailure {
        /// Number of points requested (count back + 1)
        requested: u32,
        /// Number of points actually retrieved
        retrieved: u32,
    },

    /// A historical timestamp could not be computed.
    #[error("Timestamp error: {details}")]
    Timestamp {
        /// Details about the timestamp error
        details: String,
    },

    /// A balance could not be converted for averaging.
    #[error("Conversion failed: {details}")]
    Conversion {
        /// Details about the conversion failure
        details: String,
    },

    /// A single balance lookup failed.
    #[error("Balance fetch error: {0}")]
    Balance(#[from] BalanceFetchError),
}

impl AggregationError {
    /// Create an `InvalidArgument` error.
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        AggregationError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Create a `PartialFailure` error.
    pub fn partial_failure(requested: u32, retrieved: u32) -> Self {
        AggregationError::PartialFailure {
            requested,
            retrieved,
        }
    }

    /// Create a `Timestamp` error with details.
    pub fn timestamp(details: impl Into<String>) -> Self {
        AggregationError::Timestamp {
            details: details.into(),
        }
    }

    /// Create a `Conversion` error with details.
    pub fn conversion(details: impl Into<String>) -> Self {
        AggregationError::Conversion {
            details: details.into(),
        }
    }
}
