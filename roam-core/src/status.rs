//! Lifecycle classification of trips and stops.
//!
//! Status is never stored; it is recomputed from the date range and the
//! caller-supplied `now` every time it is needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::trip::{CanonicalStop, CanonicalTrip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl DerivedStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DerivedStatus::Upcoming => "upcoming",
            DerivedStatus::Ongoing => "ongoing",
            DerivedStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for DerivedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a date range against `now`.
///
/// Comparison is by UTC calendar day and inclusive at both ends, so a range
/// that starts or ends today is `Ongoing`. Unknown bounds yield `Upcoming`.
pub fn classify(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DerivedStatus {
    let (Some(start), Some(end)) = (start, end) else {
        return DerivedStatus::Upcoming;
    };

    let today = now.date_naive();
    if start.date_naive() > today {
        DerivedStatus::Upcoming
    } else if end.date_naive() < today {
        DerivedStatus::Completed
    } else {
        DerivedStatus::Ongoing
    }
}

pub fn classify_trip(trip: &CanonicalTrip, now: DateTime<Utc>) -> DerivedStatus {
    classify(trip.start_date, trip.end_date, now)
}

pub fn classify_stop(stop: &CanonicalStop, now: DateTime<Utc>) -> DerivedStatus {
    classify(stop.start_date, stop.end_date, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_boundaries_are_inclusive_by_day() {
        let start = Some(at(2024, 1, 10, 0, 0, 0));
        let end = Some(at(2024, 1, 20, 0, 0, 0));

        assert_eq!(classify(start, end, at(2024, 1, 10, 0, 0, 0)), DerivedStatus::Ongoing);
        assert_eq!(classify(start, end, at(2024, 1, 9, 23, 59, 59)), DerivedStatus::Upcoming);
        assert_eq!(classify(start, end, at(2024, 1, 20, 23, 59, 59)), DerivedStatus::Ongoing);
        assert_eq!(classify(start, end, at(2024, 1, 21, 0, 0, 0)), DerivedStatus::Completed);
    }

    #[test]
    fn test_unknown_dates_never_complete() {
        let now = at(2030, 1, 1, 0, 0, 0);
        let past = Some(at(2001, 1, 1, 0, 0, 0));
        assert_eq!(classify(None, None, now), DerivedStatus::Upcoming);
        assert_eq!(classify(past, None, now), DerivedStatus::Upcoming);
        assert_eq!(classify(None, past, now), DerivedStatus::Upcoming);
    }

    #[test]
    fn test_single_day_trip() {
        let day = Some(at(2024, 6, 1, 9, 0, 0));
        assert_eq!(classify(day, day, at(2024, 6, 1, 22, 0, 0)), DerivedStatus::Ongoing);
        assert_eq!(classify(day, day, at(2024, 6, 2, 0, 0, 0)), DerivedStatus::Completed);
    }

    #[test]
    fn test_trip_and_stop_helpers_use_their_own_ranges() {
        let trip = CanonicalTrip::new("t1", "x")
            .with_dates(at(2024, 1, 1, 0, 0, 0), at(2024, 1, 31, 0, 0, 0));
        let stop = CanonicalStop::new("s1", "t1", "x")
            .with_dates(at(2024, 1, 20, 0, 0, 0), at(2024, 1, 25, 0, 0, 0));
        let now = at(2024, 1, 15, 12, 0, 0);
        assert_eq!(classify_trip(&trip, now), DerivedStatus::Ongoing);
        assert_eq!(classify_stop(&stop, now), DerivedStatus::Upcoming);
    }
}
