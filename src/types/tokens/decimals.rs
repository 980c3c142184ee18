// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token decimal precision type

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// ERC-20 token decimal precision
///
/// Represents the number of decimal places for a token. Most ERC-20 tokens
/// use 18 decimals (like ETH), but some use different values:
/// - USDC: 6 decimals
/// - WBTC: 8 decimals
///
/// Decimals never change for a deployed token, which is why they are cached
/// far longer than balances.
///
/// # Examples
///
/// ```
/// use balancescan::TokenDecimals;
///
/// assert_eq!(TokenDecimals::STANDARD.as_u8(), 18);
/// assert_eq!(TokenDecimals::USDC.as_u8(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Standard decimals for ETH-like tokens (18)
    pub const STANDARD: Self = Self(18);

    /// USDC decimals (6)
    pub const USDC: Self = Self(6);

    /// WBTC decimals (8)
    pub const WBTC: Self = Self(8);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Exact divisor for normalization: 10^decimals
    ///
    /// Returns `None` when 10^decimals does not fit in a U256 (decimals > 77).
    pub fn divisor(&self) -> Option<U256> {
        U256::from(10u8).checked_pow(U256::from(self.0))
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_decimals_divisor() {
        assert_eq!(TokenDecimals::USDC.divisor(), Some(U256::from(1_000_000u64)));
        assert_eq!(
            TokenDecimals::WBTC.divisor(),
            Some(U256::from(100_000_000u64))
        );
        assert_eq!(
            TokenDecimals::STANDARD.divisor(),
            Some(U256::from(1_000_000_000_000_000_000u64))
        );
        assert_eq!(TokenDecimals::new(0).divisor(), Some(U256::from(1u8)));
    }

    #[test]
    fn test_divisor_out_of_range() {
        assert!(TokenDecimals::new(77).divisor().is_some());
        assert!(TokenDecimals::new(78).divisor().is_none());
        assert!(TokenDecimals::new(255).divisor().is_none());
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(format!("{}", TokenDecimals::STANDARD), "18 decimals");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TokenDecimals::STANDARD).unwrap();
        assert_eq!(json, "18");
        let back: TokenDecimals = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TokenDecimals::STANDARD);
    }
}
