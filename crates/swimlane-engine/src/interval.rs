//! Date ranges with inclusive bounds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar date range, inclusive on both ends.
///
/// `end < start` is representable. Such a range is treated as malformed by
/// callers but never rejected here; overlap and width math still run on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl Interval {
    /// Create a new interval.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether two intervals share at least one day.
    ///
    /// Touching ranges (one ends the day the other starts) overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// Signed length in days, `end - start`.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `end` precedes `start`.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}
