//! Raw record → canonical record.
//!
//! Normalization is total and idempotent: any JSON value produces a canonical
//! record, and serializing that record and normalizing it again yields the
//! same record. Missing ids are assigned from position, so a normalized trip
//! always passes [`CanonicalTrip::validate`].

use std::collections::HashSet;

use roam_core::{CanonicalActivity, CanonicalStop, CanonicalTrip, Category};

use crate::category_rules::categorize;
use crate::coerce::{amount, array, date, first_present, safe_number, text};
use crate::envelope::{EnvelopeRules, unwrap_collection};
use crate::fields::*;
use crate::types::{Canonical, RawRecord, RecordKind};

/// Normalize a single record of the given kind.
///
/// Stops and activities normalized on their own have no parent; use
/// [`normalize_trip`] to keep trip/stop ids linked.
pub fn normalize(raw: &RawRecord, kind: RecordKind) -> Canonical {
    match kind {
        RecordKind::Trip => Canonical::Trip(normalize_trip(raw)),
        RecordKind::Stop => Canonical::Stop(normalize_stop(raw, "")),
        RecordKind::Activity => Canonical::Activity(normalize_activity(raw, "")),
    }
}

/// Every trip found in the envelope, with ids unique across the set.
pub fn normalize_trips(raw: &RawRecord, rules: &EnvelopeRules) -> Vec<CanonicalTrip> {
    let mut seen = HashSet::new();
    unwrap_collection(raw, rules)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut trip = normalize_trip_at(item, i);
            let fallback = positional_id("", "trip", i);
            let id = claim_id(&mut seen, trip.id.clone(), &fallback);
            if id != trip.id {
                relink(&mut trip, &id);
            }
            trip
        })
        .collect()
}

pub fn normalize_trip(raw: &RawRecord) -> CanonicalTrip {
    normalize_trip_at(raw, 0)
}

fn normalize_trip_at(raw: &RawRecord, position: usize) -> CanonicalTrip {
    let id = text(raw, TRIP_ID).unwrap_or_else(|| positional_id("", "trip", position));
    let title = text(raw, TRIP_TITLE).unwrap_or_else(|| DEFAULT_TRIP_TITLE.to_string());
    let destination = text(raw, TRIP_DESTINATION);

    let mut start_date = date(raw, TRIP_START);
    let mut end_date = date(raw, TRIP_END);
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            tracing::debug!(trip = %id, "trip dates inverted, swapping");
            start_date = Some(end);
            end_date = Some(start);
        }
    }

    let mut trip = CanonicalTrip {
        id,
        title,
        start_date,
        end_date,
        cover_image_url: text(raw, TRIP_COVER),
        destination,
        planned_budget: amount(raw, TRIP_BUDGET),
        stops: Vec::new(),
    };

    match array(raw, TRIP_STOPS) {
        Some(stops) => trip.stops = normalize_stop_list(stops, &trip.id),
        None => trip.stops.extend(flat_trip_stop(raw, &trip)),
    }
    trip
}

/// A trip shaped as one document with top-level activities and no stops
/// becomes a single stop spanning the trip.
fn flat_trip_stop(raw: &RawRecord, trip: &CanonicalTrip) -> Option<CanonicalStop> {
    let activities = array(raw, TRIP_FLAT_ACTIVITIES)?;
    let stop_id = positional_id(&trip.id, "stop", 0);
    Some(CanonicalStop {
        activities: normalize_activity_list(activities, &stop_id),
        id: stop_id,
        trip_id: trip.id.clone(),
        location: trip
            .destination
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        start_date: trip.start_date,
        end_date: trip.end_date,
        accommodation_cost: 0.0,
        transport_cost: 0.0,
    })
}

fn normalize_stop_list(items: &[RawRecord], trip_id: &str) -> Vec<CanonicalStop> {
    let mut seen = HashSet::new();
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut stop = normalize_stop_at(item, trip_id, i);
            let fallback = positional_id(trip_id, "stop", i);
            let id = claim_id(&mut seen, stop.id.clone(), &fallback);
            if id != stop.id {
                tracing::debug!(stop = %stop.id, reassigned = %id, "duplicate stop id");
                stop.id = id;
            }
            stop
        })
        .collect()
}

/// Normalize a stop belonging to `trip_id` (may be empty when unknown).
pub fn normalize_stop(raw: &RawRecord, trip_id: &str) -> CanonicalStop {
    normalize_stop_at(raw, trip_id, 0)
}

fn normalize_stop_at(raw: &RawRecord, trip_id: &str, position: usize) -> CanonicalStop {
    let id = text(raw, STOP_ID).unwrap_or_else(|| positional_id(trip_id, "stop", position));
    let activities = array(raw, STOP_ACTIVITIES)
        .map(|items| normalize_activity_list(items, &id))
        .unwrap_or_default();

    CanonicalStop {
        trip_id: text(raw, STOP_TRIP_ID).unwrap_or_else(|| trip_id.to_string()),
        location: text(raw, STOP_LOCATION).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        start_date: date(raw, STOP_START),
        end_date: date(raw, STOP_END),
        accommodation_cost: amount(raw, STOP_ACCOMMODATION),
        transport_cost: amount(raw, STOP_TRANSPORT),
        activities,
        id,
    }
}

fn normalize_activity_list(items: &[RawRecord], stop_id: &str) -> Vec<CanonicalActivity> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_activity_at(item, stop_id, i))
        .collect()
}

/// Normalize an activity belonging to `stop_id` (may be empty when unknown).
pub fn normalize_activity(raw: &RawRecord, stop_id: &str) -> CanonicalActivity {
    normalize_activity_at(raw, stop_id, 0)
}

fn normalize_activity_at(raw: &RawRecord, stop_id: &str, position: usize) -> CanonicalActivity {
    let duration_label = text(raw, ACTIVITY_DURATION).or_else(|| {
        let minutes = safe_number(first_present(raw, ACTIVITY_DURATION_MINUTES)?);
        (minutes > 0.0).then(|| format!("{} min", minutes.round() as i64))
    });

    CanonicalActivity {
        id: text(raw, ACTIVITY_ID).unwrap_or_else(|| positional_id(stop_id, "activity", position)),
        name: text(raw, ACTIVITY_NAME).unwrap_or_else(|| DEFAULT_ACTIVITY_NAME.to_string()),
        category: text(raw, ACTIVITY_CATEGORY)
            .map(|c| categorize(&c))
            .unwrap_or(Category::Other),
        cost: amount(raw, ACTIVITY_COST),
        duration_label,
        date_label: date(raw, ACTIVITY_DATE),
    }
}

/// Replace the stops of `trip` with a separately fetched stop collection.
pub fn attach_stops(mut trip: CanonicalTrip, raw_stops: &RawRecord) -> CanonicalTrip {
    let items = unwrap_collection(raw_stops, &EnvelopeRules::stops());
    trip.stops = normalize_stop_list(items, &trip.id);
    trip
}

/// 1-based positional id, prefixed by the parent id when there is one.
fn positional_id(parent: &str, kind: &str, position: usize) -> String {
    if parent.is_empty() {
        format!("{kind}-{}", position + 1)
    } else {
        format!("{parent}-{kind}-{}", position + 1)
    }
}

fn claim_id(seen: &mut HashSet<String>, preferred: String, fallback: &str) -> String {
    let mut id = if seen.contains(&preferred) {
        fallback.to_string()
    } else {
        preferred
    };
    let mut n = 2;
    while seen.contains(&id) {
        id = format!("{fallback}-{n}");
        n += 1;
    }
    seen.insert(id.clone());
    id
}

/// Point a trip's stops at a reassigned trip id.
fn relink(trip: &mut CanonicalTrip, id: &str) {
    tracing::debug!(trip = %trip.id, reassigned = %id, "duplicate trip id");
    for stop in &mut trip.stops {
        if stop.trip_id == trip.id {
            stop.trip_id = id.to_string();
        }
    }
    trip.id = id.to_string();
}
