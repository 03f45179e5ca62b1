//! Inconsistent-range detection.
//!
//! Ranges that disagree are reported, never rejected: aggregation and the
//! timeline keep using the raw values.

use serde::{Deserialize, Serialize};

use crate::trip::CanonicalTrip;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeWarning {
    /// Stop starts after it ends
    InvertedStopRange { stop_id: String },
    /// Stop range leaves the known trip range
    StopOutsideTrip { stop_id: String },
    /// Stop has at least one unknown date
    UnknownStopDates { stop_id: String },
    /// Activity is dated outside the known trip range
    ActivityOutsideTrip { stop_id: String, activity_id: String },
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeWarning::InvertedStopRange { stop_id } => {
                write!(f, "stop {stop_id} starts after it ends")
            }
            RangeWarning::StopOutsideTrip { stop_id } => {
                write!(f, "stop {stop_id} falls outside the trip dates")
            }
            RangeWarning::UnknownStopDates { stop_id } => {
                write!(f, "stop {stop_id} has unknown dates")
            }
            RangeWarning::ActivityOutsideTrip { stop_id, activity_id } => {
                write!(f, "activity {activity_id} (stop {stop_id}) is dated outside the trip")
            }
        }
    }
}

/// Collect range warnings for a trip, in stop order.
pub fn check_ranges(trip: &CanonicalTrip) -> Vec<RangeWarning> {
    let trip_range = trip.range();
    let mut out = Vec::new();

    for stop in &trip.stops {
        let range = stop.range();
        match (range.start, range.end) {
            (Some(start), Some(end)) => {
                if start > end {
                    out.push(RangeWarning::InvertedStopRange { stop_id: stop.id.clone() });
                }
                if let (Some(trip_start), Some(trip_end)) =
                    (trip_range.start_day(), trip_range.end_day())
                {
                    if start.date_naive() < trip_start || end.date_naive() > trip_end {
                        out.push(RangeWarning::StopOutsideTrip { stop_id: stop.id.clone() });
                    }
                }
            }
            _ => out.push(RangeWarning::UnknownStopDates { stop_id: stop.id.clone() }),
        }

        if trip_range.is_known() {
            for activity in &stop.activities {
                if let Some(day) = activity.day() {
                    if !trip_range.contains_day(day) {
                        out.push(RangeWarning::ActivityOutsideTrip {
                            stop_id: stop.id.clone(),
                            activity_id: activity.id.clone(),
                        });
                    }
                }
            }
        }
    }

    if !out.is_empty() {
        tracing::debug!(trip = %trip.id, count = out.len(), "range warnings");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::start_of_day;
    use crate::trip::{CanonicalActivity, CanonicalStop, Category};
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> chrono::DateTime<chrono::Utc> {
        start_of_day(NaiveDate::from_ymd_opt(2024, m, day).unwrap())
    }

    #[test]
    fn test_clean_trip_has_no_warnings() {
        let trip = CanonicalTrip::new("t1", "x")
            .with_dates(d(3, 1), d(3, 5))
            .with_stop(CanonicalStop::new("s1", "t1", "a").with_dates(d(3, 1), d(3, 5)));
        assert!(check_ranges(&trip).is_empty());
    }

    #[test]
    fn test_inverted_and_outside_stop() {
        let trip = CanonicalTrip::new("t1", "x")
            .with_dates(d(3, 1), d(3, 5))
            .with_stop(CanonicalStop::new("s1", "t1", "a").with_dates(d(3, 4), d(3, 2)))
            .with_stop(CanonicalStop::new("s2", "t1", "b").with_dates(d(3, 4), d(3, 9)));
        assert_eq!(
            check_ranges(&trip),
            vec![
                RangeWarning::InvertedStopRange { stop_id: "s1".into() },
                RangeWarning::StopOutsideTrip { stop_id: "s2".into() },
            ]
        );
    }

    #[test]
    fn test_unknown_trip_range_skips_containment_checks() {
        let trip = CanonicalTrip::new("t1", "x").with_stop(
            CanonicalStop::new("s1", "t1", "a")
                .with_dates(d(1, 1), d(12, 31))
                .with_activity(CanonicalActivity::new("a1", "x", Category::Other, 0.0).with_date(d(6, 1))),
        );
        assert!(check_ranges(&trip).is_empty());
    }

    #[test]
    fn test_unknown_stop_dates_and_stray_activity() {
        let trip = CanonicalTrip::new("t1", "x").with_dates(d(3, 1), d(3, 5)).with_stop(
            CanonicalStop::new("s1", "t1", "a")
                .with_activity(CanonicalActivity::new("a1", "x", Category::Other, 0.0).with_date(d(3, 9))),
        );
        let warnings = check_ranges(&trip);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0], RangeWarning::UnknownStopDates { stop_id: "s1".into() });
        assert_eq!(warnings[1].to_string(), "activity a1 (stop s1) is dated outside the trip");
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let v = serde_json::to_value(RangeWarning::StopOutsideTrip { stop_id: "s9".into() }).unwrap();
        assert_eq!(v["kind"], "stop_outside_trip");
        assert_eq!(v["stop_id"], "s9");
    }
}
