//! Itinerary timeline: stops in chronological order with day indices, and
//! the expanded one-entry-per-day calendar walk.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PreconditionViolation;
use crate::time::SECONDS_PER_DAY;
use crate::trip::{CanonicalActivity, CanonicalStop, CanonicalTrip};
use crate::warnings::{RangeWarning, check_ranges};

/// A stop placed on the trip's day axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopEntry {
    /// 1-based; `None` when the trip or stop start is unknown
    pub day_index: Option<u32>,
    pub stop: CanonicalStop,
    pub activities: Vec<CanonicalActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<StopEntry>,
    pub warnings: Vec<RangeWarning>,
}

/// One calendar day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub day_index: u32,
    pub date: NaiveDate,
    pub stop: Option<CanonicalStop>,
    pub activities: Vec<CanonicalActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTimeline {
    pub days: Vec<DayEntry>,
    pub warnings: Vec<RangeWarning>,
}

/// Stops sorted by start date. The sort is stable and unknown start dates go
/// last, so equal or unknown dates keep their input order.
pub fn chronological_stops(trip: &CanonicalTrip) -> Vec<&CanonicalStop> {
    let mut stops: Vec<&CanonicalStop> = trip.stops.iter().collect();
    stops.sort_by_key(|s| (s.start_date.is_none(), s.start_date));
    stops
}

/// `floor((stop_start - trip_start) / 1 day) + 1`, clamped to at least 1.
pub fn day_index(trip_start: Option<DateTime<Utc>>, stop_start: Option<DateTime<Utc>>) -> Option<u32> {
    let offset = stop_start? - trip_start?;
    let index = offset.num_seconds().div_euclid(SECONDS_PER_DAY) + 1;
    Some(u32::try_from(index.max(1)).unwrap_or(u32::MAX))
}

pub fn build_timeline(trip: &CanonicalTrip) -> Result<Timeline, PreconditionViolation> {
    trip.validate()?;

    let entries = chronological_stops(trip)
        .into_iter()
        .map(|stop| StopEntry {
            day_index: day_index(trip.start_date, stop.start_date),
            stop: stop.clone(),
            activities: stop.activities.clone(),
        })
        .collect();

    Ok(Timeline {
        entries,
        warnings: check_ranges(trip),
    })
}

/// Walk the trip from start to end inclusive, one entry per day.
///
/// The covering stop is the first stop, chronologically, whose range holds
/// the day. Activities are matched by `date_label` across all stops. A day no
/// stop covers is emitted empty. Unknown trip bounds give no days.
pub fn build_day_timeline(trip: &CanonicalTrip) -> Result<DayTimeline, PreconditionViolation> {
    trip.validate()?;

    let ordered = chronological_stops(trip);
    let days = trip
        .range()
        .days()
        .into_iter()
        .zip(1u32..)
        .map(|(date, day_index)| {
            let stop = ordered.iter().find(|s| s.range().contains_day(date));
            let activities = match stop {
                Some(_) => ordered
                    .iter()
                    .flat_map(|s| s.activities.iter())
                    .filter(|a| a.day() == Some(date))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };
            DayEntry {
                day_index,
                date,
                stop: stop.map(|s| (*s).clone()),
                activities,
            }
        })
        .collect();

    Ok(DayTimeline {
        days,
        warnings: check_ranges(trip),
    })
}
