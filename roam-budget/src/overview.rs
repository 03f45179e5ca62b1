//! Dashboard statistics over a user's whole trip set.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use roam_core::{CanonicalTrip, DerivedStatus, classify_trip};
use serde::{Deserialize, Serialize};

use crate::aggregate::trip_total;
use crate::status::{BudgetStatus, BudgetThresholds};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSetOverview {
    pub total_trips: usize,
    pub upcoming: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub total_planned_budget: f64,
    pub total_estimated_cost: f64,
    pub over_budget: usize,
    /// Distinct, sorted. A trip without a destination contributes its stop locations
    pub destinations: Vec<String>,
}

impl TripSetOverview {
    pub fn compute(trips: &[CanonicalTrip], now: DateTime<Utc>) -> Self {
        Self::compute_with(trips, now, &BudgetThresholds::default())
    }

    pub fn compute_with(
        trips: &[CanonicalTrip],
        now: DateTime<Utc>,
        thresholds: &BudgetThresholds,
    ) -> Self {
        let mut out = Self {
            total_trips: trips.len(),
            ..Self::default()
        };
        let mut destinations = BTreeSet::new();

        for trip in trips {
            match classify_trip(trip, now) {
                DerivedStatus::Upcoming => out.upcoming += 1,
                DerivedStatus::Ongoing => out.ongoing += 1,
                DerivedStatus::Completed => out.completed += 1,
            }

            let cost = trip_total(trip);
            out.total_planned_budget += trip.planned_budget;
            out.total_estimated_cost += cost;
            if thresholds.status(cost, trip.planned_budget) == BudgetStatus::Over {
                out.over_budget += 1;
            }

            match &trip.destination {
                Some(dest) => {
                    destinations.insert(dest.clone());
                }
                None => destinations.extend(trip.stops.iter().map(|s| s.location.clone())),
            }
        }

        out.destinations = destinations.into_iter().collect();
        out
    }
}
