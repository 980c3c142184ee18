// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw token amount type

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::decimals::TokenDecimals;

/// Raw token amount (not normalized for decimals)
///
/// This represents the raw token amount as stored on-chain in the smallest
/// unit (e.g., wei for ETH). To convert to whole tokens, use
/// [`whole_units`](Self::whole_units) with the token's [`TokenDecimals`].
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use balancescan::{TokenAmount, TokenDecimals};
///
/// // 5 tokens with 18 decimals
/// let amount = TokenAmount::new(U256::from(5_000_000_000_000_000_000u64));
/// assert_eq!(amount.whole_units(TokenDecimals::STANDARD), U256::from(5u8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero token amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new token amount from U256
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Scale by token decimals with integer division: amount / 10^decimals
    ///
    /// The fractional remainder is discarded. Decimals too large for a U256
    /// divisor always yield zero, since no U256 amount reaches 10^78.
    pub fn whole_units(&self, decimals: TokenDecimals) -> U256 {
        match decimals.divisor() {
            Some(divisor) => self.0 / divisor,
            None => U256::ZERO,
        }
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_units_exact() {
        let amount = TokenAmount::new(U256::from(5_000_000_000_000_000_000u64));
        assert_eq!(amount.whole_units(TokenDecimals::STANDARD), U256::from(5u8));
    }

    #[test]
    fn test_whole_units_truncates_remainder() {
        // 2.999999 USDC
        let amount = TokenAmount::new(U256::from(2_999_999u64));
        assert_eq!(amount.whole_units(TokenDecimals::USDC), U256::from(2u8));

        // Less than one whole token
        let dust = TokenAmount::new(U256::from(999u64));
        assert_eq!(dust.whole_units(TokenDecimals::USDC), U256::ZERO);
    }

    #[test]
    fn test_whole_units_zero_decimals() {
        let amount = TokenAmount::new(U256::from(42u8));
        assert_eq!(amount.whole_units(TokenDecimals::new(0)), U256::from(42u8));
    }

    #[test]
    fn test_whole_units_oversized_decimals() {
        assert_eq!(
            TokenAmount::new(U256::MAX).whole_units(TokenDecimals::new(200)),
            U256::ZERO
        );
    }
}
