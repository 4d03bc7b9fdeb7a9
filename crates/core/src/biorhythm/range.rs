use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DateRangeError;

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The `days` days leading up to and including `today`'s offset.
    ///
    /// `trailing_days(today, 365)` spans `today - 365 ..= today`, the default
    /// window of the person dashboard.
    pub fn trailing_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today - Duration::days(i64::from(days)),
            end: today,
        }
    }

    /// Number of calendar days in the range, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// True if `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap of two ranges, if any.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        DateRange::new(start, end).ok()
    }

    /// Iterates every calendar day in the range in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
