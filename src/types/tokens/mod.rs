//! Strong types for token-related values
//!
//! ```text
//! TokenAmount (U256, raw)
//!     |
//!     | whole_units(TokenDecimals)
//!     ↓
//! U256 (whole tokens, remainder discarded)
//! ```

mod amount;
mod decimals;

pub use amount::TokenAmount;
pub use decimals::TokenDecimals;
