//! Canonical trip, stop and activity records.
//!
//! Everything downstream of ingest works on these shapes only. They serialize
//! with camelCase keys and RFC 3339 instants, which the normalizer reads back
//! unchanged.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PreconditionViolation;
use crate::time::DateRange;

/// A planned trip made of ordered stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTrip {
    /// Unique within a user's trip set
    pub id: String,
    pub title: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub cover_image_url: Option<String>,
    pub destination: Option<String>,
    /// Target spend; 0 means "no target"
    pub planned_budget: f64,
    pub stops: Vec<CanonicalStop>,
}

/// One leg of a trip: a place, a date range, fixed costs and activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalStop {
    pub id: String,
    pub trip_id: String,
    pub location: String,
    /// `None` when the source date could not be parsed
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub accommodation_cost: f64,
    pub transport_cost: f64,
    /// Input order is user intent and is never re-sorted
    pub activities: Vec<CanonicalActivity>,
}

/// A priced activity attached to a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalActivity {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub cost: f64,
    pub duration_label: Option<String>,
    pub date_label: Option<DateTime<Utc>>,
}

/// The six fixed cost buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Accommodation")]
    Accommodation,
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Activities")]
    Activities,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every bucket, in display order.
    pub const ALL: [Category; 6] = [
        Category::Transportation,
        Category::Accommodation,
        Category::FoodAndDining,
        Category::Activities,
        Category::Shopping,
        Category::Other,
    ];

    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Category::Transportation => "Transportation",
            Category::Accommodation => "Accommodation",
            Category::FoodAndDining => "Food & Dining",
            Category::Activities => "Activities",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Exact (case-insensitive) label match.
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl CanonicalTrip {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date: None,
            end_date: None,
            cover_image_url: None,
            destination: None,
            planned_budget: 0.0,
            stops: Vec::new(),
        }
    }

    pub fn with_dates(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_budget(mut self, planned_budget: f64) -> Self {
        self.planned_budget = planned_budget;
        self
    }

    pub fn with_stop(mut self, stop: CanonicalStop) -> Self {
        self.stops.push(stop);
        self
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// All activities across stops, stop order then input order.
    pub fn activities(&self) -> impl Iterator<Item = &CanonicalActivity> {
        self.stops.iter().flat_map(|s| s.activities.iter())
    }

    /// Check the shape guarantees the normalizer provides.
    ///
    /// A failure here means the record bypassed normalization.
    pub fn validate(&self) -> Result<(), PreconditionViolation> {
        if self.id.trim().is_empty() {
            return Err(PreconditionViolation::EmptyId { kind: "trip" });
        }
        check_amount(&self.id, "plannedBudget", self.planned_budget)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(PreconditionViolation::InvertedTripRange {
                    trip_id: self.id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for stop in &self.stops {
            if stop.id.trim().is_empty() {
                return Err(PreconditionViolation::EmptyId { kind: "stop" });
            }
            if !seen.insert(stop.id.as_str()) {
                return Err(PreconditionViolation::DuplicateStopId(stop.id.clone()));
            }
            check_amount(&stop.id, "accommodationCost", stop.accommodation_cost)?;
            check_amount(&stop.id, "transportCost", stop.transport_cost)?;
            for activity in &stop.activities {
                if activity.id.trim().is_empty() {
                    return Err(PreconditionViolation::EmptyId { kind: "activity" });
                }
                check_amount(&activity.id, "cost", activity.cost)?;
            }
        }
        Ok(())
    }
}

fn check_amount(record: &str, field: &'static str, value: f64) -> Result<(), PreconditionViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PreconditionViolation::InvalidAmount {
            record: record.to_string(),
            field,
            value,
        })
    }
}

impl CanonicalStop {
    pub fn new(
        id: impl Into<String>,
        trip_id: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            trip_id: trip_id.into(),
            location: location.into(),
            start_date: None,
            end_date: None,
            accommodation_cost: 0.0,
            transport_cost: 0.0,
            activities: Vec::new(),
        }
    }

    pub fn with_dates(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_costs(mut self, accommodation: f64, transport: f64) -> Self {
        self.accommodation_cost = accommodation;
        self.transport_cost = transport;
        self
    }

    pub fn with_activity(mut self, activity: CanonicalActivity) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl CanonicalActivity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            cost,
            duration_label: None,
            date_label: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date_label = Some(date);
        self
    }

    pub fn with_duration(mut self, label: impl Into<String>) -> Self {
        self.duration_label = Some(label.into());
        self
    }

    /// Calendar day of `date_label`, if known.
    pub fn day(&self) -> Option<NaiveDate> {
        self.date_label.map(|d| d.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_category_labels_round_trip_through_from_label() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), Some(c));
        }
        assert_eq!(Category::from_label("food & dining"), Some(Category::FoodAndDining));
        assert_eq!(Category::from_label("sightseeing"), None);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");
    }

    #[test]
    fn test_trip_serializes_camel_case() {
        let trip = CanonicalTrip::new("t1", "Lisbon").with_dates(day(2024, 3, 1), day(2024, 3, 3));
        let v = serde_json::to_value(&trip).unwrap();
        assert_eq!(v["startDate"], "2024-03-01T00:00:00Z");
        assert_eq!(v["plannedBudget"], 0.0);
        assert!(v["coverImageUrl"].is_null());
    }

    #[test]
    fn test_validate_accepts_builder_output() {
        let trip = CanonicalTrip::new("t1", "Lisbon")
            .with_dates(day(2024, 3, 1), day(2024, 3, 3))
            .with_stop(
                CanonicalStop::new("s1", "t1", "Lisbon")
                    .with_costs(200.0, 50.0)
                    .with_activity(CanonicalActivity::new("a1", "Tram 28", Category::Activities, 3.0)),
            );
        assert!(trip.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_stop_ids() {
        let trip = CanonicalTrip::new("t1", "Lisbon")
            .with_stop(CanonicalStop::new("s1", "t1", "Lisbon"))
            .with_stop(CanonicalStop::new("s1", "t1", "Porto"));
        assert_eq!(
            trip.validate(),
            Err(PreconditionViolation::DuplicateStopId("s1".into()))
        );
    }

    #[test]
    fn test_validate_rejects_negative_and_nan_costs() {
        let trip = CanonicalTrip::new("t1", "x")
            .with_stop(CanonicalStop::new("s1", "t1", "x").with_costs(-1.0, 0.0));
        assert!(matches!(
            trip.validate(),
            Err(PreconditionViolation::InvalidAmount { field: "accommodationCost", .. })
        ));

        let trip = CanonicalTrip::new("t1", "x").with_budget(f64::NAN);
        assert!(matches!(
            trip.validate(),
            Err(PreconditionViolation::InvalidAmount { field: "plannedBudget", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_trip_range() {
        let trip = CanonicalTrip::new("t1", "x").with_dates(day(2024, 3, 5), day(2024, 3, 1));
        assert!(matches!(
            trip.validate(),
            Err(PreconditionViolation::InvertedTripRange { .. })
        ));
    }

    #[test]
    fn test_activities_iterates_in_stop_order() {
        let trip = CanonicalTrip::new("t1", "x")
            .with_stop(
                CanonicalStop::new("s1", "t1", "a")
                    .with_activity(CanonicalActivity::new("a1", "one", Category::Other, 1.0))
                    .with_activity(CanonicalActivity::new("a2", "two", Category::Other, 1.0)),
            )
            .with_stop(
                CanonicalStop::new("s2", "t1", "b")
                    .with_activity(CanonicalActivity::new("a3", "three", Category::Other, 1.0)),
            );
        let ids: Vec<_> = trip.activities().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "a3"]);
    }
}
