// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Time units and end-of-period checkpoints
//!
//! Historical points snap to the close of their period rather than to the
//! exact moment `n` units ago:
//!
//! | unit     | checkpoint for `n` periods back                      |
//! |----------|------------------------------------------------------|
//! | `hours`  | `HH:59:59` of the hour `n` hours ago                 |
//! | `days`   | `23:59:59` of the day `n` days ago                   |
//! | `months` | `23:59:59` on the last day of the month `n` months ago |
//! | `years`  | `23:59:59` on December 31st of the year `n` years ago  |
//!
//! All arithmetic is in UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AggregationError;

/// Calendar unit for stepping back through history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One hour
    Hours,
    /// One calendar day
    Days,
    /// One calendar month
    Months,
    /// One calendar year
    Years,
}

impl TimeUnit {
    /// Every supported unit, in ascending length
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Months,
        TimeUnit::Years,
    ];

    /// Lowercase name accepted by [`FromStr`]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        }
    }

    /// Close of the period `periods_back` units before `now`
    ///
    /// Month and year arithmetic clamps to the last valid day, so March 31st
    /// minus one month lands in February.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::Timestamp`] if the result falls outside the
    /// range chrono can represent.
    ///
    /// # Examples
    ///
    /// ```
    /// use balancescan::TimeUnit;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
    /// let end = TimeUnit::Days.end_of_period(now, 2).unwrap();
    /// assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 13, 23, 59, 59).unwrap());
    /// ```
    pub fn end_of_period(
        &self,
        now: DateTime<Utc>,
        periods_back: u32,
    ) -> Result<DateTime<Utc>, AggregationError> {
        let out_of_range = || {
            AggregationError::timestamp(format!(
                "{periods_back} {self} before {now} is out of range"
            ))
        };

        let end = match self {
            TimeUnit::Hours => now
                .checked_sub_signed(TimeDelta::hours(i64::from(periods_back)))
                .and_then(|t| t.with_minute(59))
                .and_then(|t| t.with_second(59))
                .and_then(|t| t.with_nanosecond(0)),
            TimeUnit::Days => now
                .date_naive()
                .checked_sub_days(Days::new(u64::from(periods_back)))
                .and_then(end_of_day),
            TimeUnit::Months => now
                .date_naive()
                .checked_sub_months(Months::new(periods_back))
                .and_then(last_day_of_month)
                .and_then(end_of_day),
            TimeUnit::Years => i32::try_from(periods_back)
                .ok()
                .and_then(|back| now.year().checked_sub(back))
                .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
                .and_then(end_of_day),
        };

        end.ok_or_else(out_of_range)
    }
}

fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|t| t.and_utc())
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| {
                AggregationError::invalid_argument(
                    "time_unit",
                    format!(
                        "unknown time unit {s}, supported are: {}",
                        TimeUnit::ALL.map(|unit| unit.as_str()).join(", ")
                    ),
                )
            })
    }
}
