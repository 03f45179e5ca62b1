//! Filtering and ordering of a user's trip set for list views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{DerivedStatus, classify_trip};
use crate::trip::CanonicalTrip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripSort {
    /// Keep the order the trips arrived in
    #[default]
    Input,
    Title,
    /// Unknown start dates last
    StartDate,
    /// Largest planned budget first
    Budget,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripQuery {
    pub status: Option<DerivedStatus>,
    /// Case-insensitive match on title or destination
    pub search: Option<String>,
    pub sort: TripSort,
}

impl TripQuery {
    pub fn with_status(mut self, status: DerivedStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: TripSort) -> Self {
        self.sort = sort;
        self
    }

    fn matches(&self, trip: &CanonicalTrip, now: DateTime<Utc>) -> bool {
        if let Some(status) = self.status {
            if classify_trip(trip, now) != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                trip.title.to_lowercase().contains(&term)
                    || trip
                        .destination
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

/// Apply `query` against `now`. All sorts are stable.
pub fn query_trips<'a>(
    trips: &'a [CanonicalTrip],
    query: &TripQuery,
    now: DateTime<Utc>,
) -> Vec<&'a CanonicalTrip> {
    let mut out: Vec<&CanonicalTrip> = trips.iter().filter(|t| query.matches(t, now)).collect();

    match query.sort {
        TripSort::Input => {}
        TripSort::Title => out.sort_by_cached_key(|t| t.title.to_lowercase()),
        TripSort::StartDate => out.sort_by_key(|t| (t.start_date.is_none(), t.start_date)),
        TripSort::Budget => out.sort_by(|a, b| b.planned_budget.total_cmp(&a.planned_budget)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap()
    }

    fn trips() -> Vec<CanonicalTrip> {
        vec![
            CanonicalTrip::new("1", "paris weekend")
                .with_dates(at(5, 1), at(5, 3))
                .with_destination("Paris")
                .with_budget(800.0),
            CanonicalTrip::new("2", "Alps")
                .with_dates(at(1, 10), at(1, 20))
                .with_destination("Chamonix")
                .with_budget(2500.0),
            CanonicalTrip::new("3", "Someday").with_budget(100.0),
            CanonicalTrip::new("4", "Berlin")
                .with_dates(at(2, 28), at(3, 4))
                .with_destination("Berlin")
                .with_budget(800.0),
        ]
    }

    fn ids(v: &[&CanonicalTrip]) -> Vec<String> {
        v.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_status_filter() {
        let trips = trips();
        let now = at(3, 1);
        let upcoming = query_trips(&trips, &TripQuery::default().with_status(DerivedStatus::Upcoming), now);
        // unknown dates count as upcoming
        assert_eq!(ids(&upcoming), ["1", "3"]);
        let ongoing = query_trips(&trips, &TripQuery::default().with_status(DerivedStatus::Ongoing), now);
        assert_eq!(ids(&ongoing), ["4"]);
        let done = query_trips(&trips, &TripQuery::default().with_status(DerivedStatus::Completed), now);
        assert_eq!(ids(&done), ["2"]);
    }

    #[test]
    fn test_search_matches_title_or_destination() {
        let trips = trips();
        let found = query_trips(&trips, &TripQuery::default().with_search("PARIS"), at(1, 1));
        assert_eq!(ids(&found), ["1"]);
        let found = query_trips(&trips, &TripQuery::default().with_search("chamo"), at(1, 1));
        assert_eq!(ids(&found), ["2"]);
        let all = query_trips(&trips, &TripQuery::default().with_search("  "), at(1, 1));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_sorts() {
        let trips = trips();
        let now = at(1, 1);
        let by_title = query_trips(&trips, &TripQuery::default().with_sort(TripSort::Title), now);
        assert_eq!(ids(&by_title), ["2", "4", "1", "3"]);
        let by_start = query_trips(&trips, &TripQuery::default().with_sort(TripSort::StartDate), now);
        assert_eq!(ids(&by_start), ["2", "4", "1", "3"]);
        let by_budget = query_trips(&trips, &TripQuery::default().with_sort(TripSort::Budget), now);
        assert_eq!(ids(&by_budget), ["2", "1", "4", "3"]);
    }
}
