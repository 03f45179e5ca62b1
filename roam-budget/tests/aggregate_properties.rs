use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use roam_budget::aggregate;
use roam_core::{CanonicalActivity, CanonicalStop, CanonicalTrip, Category};

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn arb_amount() -> impl Strategy<Value = f64> {
    (0u32..500_000).prop_map(|cents| cents as f64 / 100.0)
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn arb_activity(i: usize) -> impl Strategy<Value = CanonicalActivity> {
    (arb_category(), arb_amount(), prop::option::of((-5i64..40, 0i64..1440))).prop_map(
        move |(category, cost, when)| {
            let activity =
                CanonicalActivity::new(format!("a{i}"), format!("Activity {i}"), category, cost);
            match when {
                Some((day, minute)) => activity
                    .with_date(base() + Duration::days(day) + Duration::minutes(minute)),
                None => activity,
            }
        },
    )
}

fn arb_stop(i: usize) -> impl Strategy<Value = CanonicalStop> {
    (
        arb_amount(),
        arb_amount(),
        (0usize..5).prop_flat_map(|n| (0..n).map(arb_activity).collect::<Vec<_>>()),
    )
        .prop_map(move |(accommodation, transport, activities)| {
            let mut stop = CanonicalStop::new(format!("s{i}"), "t", format!("Place {i}"))
                .with_costs(accommodation, transport);
            stop.activities = activities;
            stop
        })
}

fn arb_trip() -> impl Strategy<Value = CanonicalTrip> {
    (
        0usize..5,
        prop::option::of((0i64..20, 0i64..30)),
        arb_amount(),
    )
        .prop_flat_map(|(n, dates, budget)| {
            let stops: Vec<_> = (0..n).map(arb_stop).collect();
            (stops, Just(dates), Just(budget))
        })
        .prop_map(|(stops, dates, budget)| {
            let mut trip = CanonicalTrip::new("t", "Generated").with_budget(budget);
            if let Some((offset, len)) = dates {
                let start = base() + Duration::days(offset);
                trip = trip.with_dates(start, start + Duration::days(len));
            }
            trip.stops = stops;
            trip
        })
}

proptest! {
    #[test]
    fn decompositions_agree(trip in arb_trip()) {
        let summary = aggregate(&trip).unwrap();
        let by_stop: f64 = summary.by_stop.values().sum();
        let by_category: f64 = summary.by_category.values().sum();
        let tolerance = 1e-6 * summary.total.max(1.0);
        prop_assert!((summary.total - by_stop).abs() < tolerance);
        prop_assert!((summary.total - by_category).abs() < tolerance);
        prop_assert_eq!(summary.by_category.len(), 6);
    }

    #[test]
    fn breakdown_covers_every_day(trip in arb_trip()) {
        let summary = aggregate(&trip).unwrap();
        match (trip.start_date, trip.end_date) {
            (Some(start), Some(end)) => {
                let expected = (end.date_naive() - start.date_naive()).num_days() + 1;
                prop_assert_eq!(summary.daily_breakdown.len() as i64, expected);
            }
            _ => prop_assert!(summary.daily_breakdown.is_empty()),
        }
        let dated: f64 = summary.daily_breakdown.iter().map(|d| d.amount).sum();
        prop_assert!(dated <= summary.total + 1e-6);
    }

    #[test]
    fn breakdown_matches_activities_by_calendar_day(trip in arb_trip()) {
        let summary = aggregate(&trip).unwrap();
        for day in &summary.daily_breakdown {
            let expected: f64 = trip
                .activities()
                .filter(|a| a.date_label.map(|d| d.date_naive()) == Some(day.date))
                .map(|a| a.cost)
                .sum();
            prop_assert!((day.amount - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn aggregate_is_deterministic(trip in arb_trip()) {
        let first = aggregate(&trip).unwrap();
        let second = aggregate(&trip).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }
}
