//! Cost aggregation for a single trip.
//!
//! One pass over the stops produces the total and two independent
//! decompositions of it (per stop and per category), plus a per-day view of
//! dated activity spend across the trip's date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use roam_core::{CanonicalStop, CanonicalTrip, Category, PreconditionViolation, RangeWarning, check_ranges};
use serde::{Deserialize, Serialize};

use crate::status::{BudgetStatus, BudgetThresholds};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Activity spend dated on one day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpend {
    pub date: NaiveDate,
    pub amount: f64,
    pub activity_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub trip_id: String,
    pub total: f64,
    /// All six buckets, zero-filled
    pub by_category: BTreeMap<Category, f64>,
    pub by_stop: BTreeMap<String, f64>,
    /// One entry per trip day; empty when either bound is unknown
    pub daily_breakdown: Vec<DailySpend>,
    pub planned_budget: f64,
    pub status: BudgetStatus,
    /// Negative when over the plan
    pub remaining: f64,
    /// `total` per night of the trip; 0 for unknown or same-day ranges
    pub daily_average: f64,
    /// `total / planned`, 0 without a plan
    pub utilization: f64,
    pub warnings: Vec<RangeWarning>,
}

impl BudgetSummary {
    /// Fraction of the total spent in `category`; 0 when nothing was spent.
    pub fn share(&self, category: Category) -> f64 {
        if self.total == 0.0 {
            return 0.0;
        }
        self.by_category.get(&category).copied().unwrap_or(0.0) / self.total
    }

    /// Shares for every bucket in display order.
    pub fn category_shares(&self) -> Vec<(Category, f64)> {
        Category::ALL.iter().map(|&c| (c, self.share(c))).collect()
    }

    /// Day with the highest dated spend (first one on ties).
    pub fn busiest_day(&self) -> Option<&DailySpend> {
        self.daily_breakdown
            .iter()
            .filter(|d| d.amount > 0.0)
            .fold(None, |best: Option<&DailySpend>, d| match best {
                Some(b) if b.amount >= d.amount => Some(b),
                _ => Some(d),
            })
    }
}

/// `accommodation + transport + Σ activity costs` for one stop.
pub fn stop_total(stop: &CanonicalStop) -> f64 {
    stop.accommodation_cost
        + stop.transport_cost
        + stop.activities.iter().map(|a| a.cost).sum::<f64>()
}

/// Sum of all stop totals. Does not validate the trip.
pub fn trip_total(trip: &CanonicalTrip) -> f64 {
    trip.stops.iter().map(stop_total).sum()
}

/// Aggregate with the default status thresholds.
pub fn aggregate(trip: &CanonicalTrip) -> Result<BudgetSummary, PreconditionViolation> {
    aggregate_with(trip, &BudgetThresholds::default())
}

pub fn aggregate_with(
    trip: &CanonicalTrip,
    thresholds: &BudgetThresholds,
) -> Result<BudgetSummary, PreconditionViolation> {
    trip.validate()?;

    let mut by_category: BTreeMap<Category, f64> =
        Category::ALL.iter().map(|&c| (c, 0.0)).collect();
    let mut by_stop = BTreeMap::new();
    let mut total = 0.0;

    for stop in &trip.stops {
        *by_category.entry(Category::Accommodation).or_default() += stop.accommodation_cost;
        *by_category.entry(Category::Transportation).or_default() += stop.transport_cost;
        for activity in &stop.activities {
            *by_category.entry(activity.category).or_default() += activity.cost;
        }

        let amount = stop_total(stop);
        by_stop.insert(stop.id.clone(), amount);
        total += amount;
    }

    let daily_breakdown = daily_breakdown(trip);
    let daily_average = match trip_nights(trip) {
        Some(nights) if nights > 0 => total / nights as f64,
        _ => 0.0,
    };

    let planned = trip.planned_budget;
    let utilization = if planned > 0.0 { total / planned } else { 0.0 };
    let status = thresholds.status(total, planned);

    tracing::debug!(trip = %trip.id, total, %status, days = daily_breakdown.len(), "aggregated budget");

    Ok(BudgetSummary {
        trip_id: trip.id.clone(),
        total,
        by_category,
        by_stop,
        daily_breakdown,
        planned_budget: planned,
        status,
        remaining: planned - total,
        daily_average,
        utilization,
        warnings: check_ranges(trip),
    })
}

/// Whole days from start to end, rounded up: a 03-01..03-03 trip is 2 nights.
pub fn trip_nights(trip: &CanonicalTrip) -> Option<i64> {
    let (start, end) = (trip.start_date?, trip.end_date?);
    let millis = (end - start).num_milliseconds();
    Some(millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) > 0))
}

fn daily_breakdown(trip: &CanonicalTrip) -> Vec<DailySpend> {
    let mut days: BTreeMap<NaiveDate, DailySpend> = trip
        .range()
        .days()
        .into_iter()
        .map(|date| {
            let entry = DailySpend { date, amount: 0.0, activity_names: Vec::new() };
            (date, entry)
        })
        .collect();

    for activity in trip.activities() {
        if let Some(day) = activity.day().and_then(|d| days.get_mut(&d)) {
            day.amount += activity.cost;
            day.activity_names.push(activity.name.clone());
        }
    }

    days.into_values().collect()
}
