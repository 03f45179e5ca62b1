//! Month-grid projection of a trip: one tile per day with activity density.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::DateRange;
use crate::trip::{CanonicalActivity, CanonicalTrip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarTile {
    pub date: NaiveDate,
    pub in_trip: bool,
    pub activity_count: usize,
    pub is_selected: bool,
}

/// Project a single day. `activities_on_date` is expected to be pre-filtered.
pub fn calendar_tile(
    date: NaiveDate,
    trip_range: &DateRange,
    activities_on_date: &[&CanonicalActivity],
    selected: Option<NaiveDate>,
) -> CalendarTile {
    CalendarTile {
        date,
        in_trip: trip_range.contains_day(date),
        activity_count: activities_on_date.len(),
        is_selected: selected == Some(date),
    }
}

/// Activities of every stop whose `date_label` falls on `date`.
pub fn activities_on(trip: &CanonicalTrip, date: NaiveDate) -> Vec<&CanonicalActivity> {
    trip.activities().filter(|a| a.day() == Some(date)).collect()
}

/// Tiles for every day of `month` in `year`. An invalid month yields no tiles.
pub fn month_grid(
    trip: &CanonicalTrip,
    year: i32,
    month: u32,
    selected: Option<NaiveDate>,
) -> Vec<CalendarTile> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut by_day: BTreeMap<NaiveDate, Vec<&CanonicalActivity>> = BTreeMap::new();
    for activity in trip.activities() {
        if let Some(day) = activity.day() {
            by_day.entry(day).or_default().push(activity);
        }
    }

    let range = trip.range();
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| {
            let on_date = by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            calendar_tile(date, &range, on_date, selected)
        })
        .collect()
}
