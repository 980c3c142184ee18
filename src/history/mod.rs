// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Time-series balance aggregation.
//!
//! This module provides functionality for:
//! - Parsing and validating time units (`hours`, `days`, `months`, `years`)
//! - Computing calendar-aligned, end-of-period checkpoints in UTC
//! - Driving sequential, paced balance lookups and averaging the results

mod aggregator;
mod period;
mod result;

// Re-export public API
pub use aggregator::BalanceAggregator;
pub use period::TimeUnit;
pub use result::{AggregationResult, BalancePoint};
