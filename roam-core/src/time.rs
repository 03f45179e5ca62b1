//! Date utilities: calendar-day views over UTC instants.
//!
//! All day-level comparisons in the engine go through here so that time of
//! day is ignored consistently.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// UTC midnight at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// A possibly half-known date range. Unknown bounds never compare as instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn is_known(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start.map(|d| d.date_naive())
    }

    pub fn end_day(&self) -> Option<NaiveDate> {
        self.end.map(|d| d.date_naive())
    }

    /// Date-only inclusive containment; false when either bound is unknown.
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        match (self.start_day(), self.end_day()) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }

    /// Number of calendar days from start to end inclusive.
    ///
    /// Zero when a bound is unknown or the range is inverted.
    pub fn day_count(&self) -> usize {
        match (self.start_day(), self.end_day()) {
            (Some(start), Some(end)) if start <= end => (end - start).num_days() as usize + 1,
            _ => 0,
        }
    }

    /// Every calendar day in the range, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        match self.start_day() {
            Some(start) => start.iter_days().take(self.day_count()).collect(),
            None => Vec::new(),
        }
    }
}
