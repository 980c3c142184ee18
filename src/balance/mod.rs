// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Point-in-time token balances.
//!
//! [`BalanceFetcher`] resolves a timestamp to a block, reads the holder's raw
//! balance at that block from a [`TokenBalanceSource`], and scales it by the
//! token's decimals. Balances and decimals are cached separately: balances
//! for an hour, decimals for thirty days.

mod fetcher;
mod source;

pub use fetcher::BalanceFetcher;
pub use source::{Erc20BalanceSource, TokenBalanceSource, IERC20};
