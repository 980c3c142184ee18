// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across balancescan.
//!
//! This module provides newtype wrappers for various domain concepts:
//! - Unix timestamps
//! - Raw token amounts and decimals

pub mod timestamp;
pub mod tokens;

// Note: Public types are re-exported from lib.rs, not here
