//! roam-budget: per-trip cost aggregation, budget status and trip-set overview

pub mod aggregate;
pub mod overview;
pub mod status;

pub use aggregate::{
    BudgetSummary, DailySpend, aggregate, aggregate_with, stop_total, trip_nights, trip_total,
};
pub use overview::TripSetOverview;
pub use status::{BudgetStatus, BudgetThresholds};
