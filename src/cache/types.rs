// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for cache metadata
//!
//! - [`TimestampMillis`]: Unix timestamp in milliseconds for expiry and eviction ordering
//! - [`AccessSequence`]: Monotonic sequence number for deterministic LRU ordering

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Unix timestamp in milliseconds
///
/// Uses milliseconds instead of seconds so entries written in rapid
/// succession still order reliably, and so short test lifetimes expire
/// when expected.
///
/// # Examples
///
/// ```
/// use balancescan::cache::types::TimestampMillis;
/// use std::time::Duration;
///
/// let expires_at = TimestampMillis::now().after(Duration::from_secs(3600));
/// assert!(!expires_at.is_past());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMillis(u128);

impl TimestampMillis {
    /// Creates a new timestamp representing the current time
    pub fn now() -> Self {
        Self(now_millis())
    }

    /// Creates a timestamp from a raw millisecond value
    #[cfg(test)]
    pub(crate) fn from_millis(millis: u128) -> Self {
        Self(millis)
    }

    /// Returns the timestamp `duration` after this one
    pub fn after(&self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.as_millis()))
    }

    /// Checks whether this timestamp has been reached
    pub fn is_past(&self) -> bool {
        now_millis() >= self.0
    }
}

impl Default for TimestampMillis {
    fn default() -> Self {
        Self::now()
    }
}

/// Monotonic sequence number for deterministic LRU ordering
///
/// When multiple cache entries share the same access time, the sequence
/// number breaks the tie. Lower sequence numbers are considered older.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct AccessSequence(u64);

impl AccessSequence {
    /// Returns the next sequence number
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_millis_ordering() {
        let t1 = TimestampMillis::from_millis(1000);
        let t2 = TimestampMillis::from_millis(2000);
        assert!(t1 < t2);
        assert_eq!(t1.after(Duration::from_secs(1)), t2);
    }

    #[test]
    fn timestamp_millis_past_and_future() {
        assert!(TimestampMillis::from_millis(0).is_past());
        assert!(TimestampMillis::now().is_past());
        assert!(!TimestampMillis::now()
            .after(Duration::from_secs(60))
            .is_past());
    }

    #[test]
    fn timestamp_millis_after_saturates() {
        let max = TimestampMillis::from_millis(u128::MAX);
        assert_eq!(max.after(Duration::from_secs(1)), max);
    }

    #[test]
    fn access_sequence_increments() {
        let seq = AccessSequence::default();
        assert!(seq < seq.next());
        assert!(seq.next() < seq.next().next());
    }
}
