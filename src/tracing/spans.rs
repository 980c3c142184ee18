// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for balancescan operations.
//!
//! Each instrumented operation has a corresponding span helper here instead of
//! an `#[instrument]` attribute on the function itself. Spans are attached to
//! futures with [`tracing::Instrument`] so they stay `Send` across awaits:
//!
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param))
//!     .await
//! }
//! ```

use alloy_primitives::Address;
use tracing::{Level, Span};

use crate::history::TimeUnit;
use crate::types::timestamp::UnixTimestamp;

/// Create span for resolving a timestamp to a block number.
///
/// Parent: fetch_balance span (or None when called directly)
/// Children: none (explorer HTTP requests are not instrumented)
#[inline]
pub(crate) fn resolve_block(timestamp: UnixTimestamp) -> Span {
    tracing::debug_span!("balancescan.resolve_block", timestamp = %timestamp)
}

/// Create span for fetching a token balance at a timestamp.
///
/// Parent: aggregate span (or None for single lookups)
/// Children: resolve_block span
#[inline]
pub(crate) fn fetch_balance(contract: Address, holder: Address, timestamp: UnixTimestamp) -> Span {
    tracing::debug_span!(
        "balancescan.fetch_balance",
        contract = %contract,
        holder = %holder,
        timestamp = %timestamp,
    )
}

/// Create span for a full time-series aggregation.
///
/// This is the root span for the `get_balance_since_x_*` entry points.
///
/// Parent: None (root span for this operation)
/// Children: fetch_balance spans (one per point)
#[inline]
pub(crate) fn aggregate(
    contract: Address,
    holder: Address,
    unit: TimeUnit,
    count_back: u32,
) -> Span {
    tracing::span!(
        Level::INFO,
        "balancescan.aggregate",
        contract = %contract,
        holder = %holder,
        unit = %unit,
        count_back = count_back,
    )
}
