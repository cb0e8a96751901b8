//! The fixed calendar window a timeline is plotted against, and the mapping
//! from dates to horizontal percentages.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Error type for window construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("Window start {start} must be before end {end}")]
    Degenerate { start: NaiveDate, end: NaiveDate },
}

/// Visible calendar span. Both bounds are inclusive days.
///
/// Immutable once built; a different visible range means a new window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimelineWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unvalidated window as it appears in documents.
#[derive(Deserialize)]
struct RawWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawWindow> for TimelineWindow {
    type Error = WindowError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimelineWindow {
    /// Create a window. Fails unless `start` is strictly before `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::Degenerate { start, end });
        }
        Ok(Self { start, end })
    }

    /// First visible day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last visible day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both bounds.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Mapper from dates to percentages of this window.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper {
            start: self.start,
            span_days: self.span_days(),
        }
    }

    /// One tick per calendar month whose first day falls inside the window.
    ///
    /// Labels carry the year when the window crosses a year boundary.
    pub fn month_ticks(&self) -> Vec<MonthTick> {
        let mapper = self.mapper();
        let multi_year = self.start.year() != self.end.year();

        let mut ticks = Vec::new();
        let mut cursor = first_of_month_on_or_after(self.start);
        while let Some(first) = cursor {
            if first > self.end {
                break;
            }
            let name = MONTH_NAMES[first.month0() as usize];
            let label = if multi_year {
                format!("{name} {}", first.year())
            } else {
                name.to_string()
            };
            ticks.push(MonthTick {
                label,
                date: first,
                left_percent: mapper.left_percent(first),
            });
            cursor = next_month(first);
        }
        ticks
    }
}

fn first_of_month_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    if date.day() == 1 {
        Some(date)
    } else {
        next_month(date)
    }
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

/// A month boundary on the ruler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTick {
    pub label: String,
    pub date: NaiveDate,
    pub left_percent: Percent,
}

/// Maps dates onto `[0, 100]` percent of a [`TimelineWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    start: NaiveDate,
    span_days: i64,
}

impl CoordinateMapper {
    /// Offset of `date` from the window's left edge, clamped to `[0, 100]`.
    ///
    /// The span counts both end days, so the window's last day maps just
    /// short of 100% (99.73% for a 365-day window); only dates past the end
    /// reach 100.
    pub fn left_percent(&self, date: NaiveDate) -> Percent {
        let pct = self.ratio((date - self.start).num_days()) * 100.0;
        Percent(pct.clamp(0.0, 100.0))
    }

    /// Width of `start..end` as a share of the window.
    ///
    /// Floored at zero but never capped: an item running past the window end
    /// reports its full width, and clipping is left to the renderer.
    pub fn width_percent(&self, start: NaiveDate, end: NaiveDate) -> Percent {
        let pct = self.ratio((end - start).num_days()) * 100.0;
        Percent(pct.max(0.0))
    }

    #[allow(clippy::cast_precision_loss)]
    fn ratio(&self, days: i64) -> f64 {
        days as f64 / self.span_days as f64
    }
}

/// A horizontal percentage. Displays and serializes with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percent(pub f64);

impl Percent {
    /// Raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Value rounded to two decimals.
    pub fn rounded(self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.rounded())
    }
}
