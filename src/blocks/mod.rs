// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Timestamp to block resolution.
//!
//! This module provides functionality for:
//! - Mapping a Unix timestamp to the latest block at or before it
//! - Retrying transient block explorer failures with a fixed delay
//! - Caching resolved blocks so repeated lookups stay off the network

mod resolver;

// Re-export public API
pub use resolver::BlockResolver;
