use roam_budget::aggregate;
use roam_core::build_day_timeline;
use roam_ingest::normalize_trip;
use serde_json::json;

#[test]
fn test_epoch_bounds_near_chrono_limits_aggregate_to_no_days() {
    let trip = normalize_trip(&json!({
        "id": "far",
        "startDate": -8e15,
        "endDate": 8e15,
        "stops": [{"location": "Nowhere", "accommodationCost": 10}]
    }));
    assert_eq!(trip.start_date, None);
    assert_eq!(trip.end_date, None);

    let summary = aggregate(&trip).unwrap();
    assert!(summary.daily_breakdown.is_empty());
    assert_eq!(summary.total, 10.0);
    assert_eq!(summary.daily_average, 0.0);
    assert!(build_day_timeline(&trip).unwrap().days.is_empty());
}

#[test]
fn test_one_bound_beyond_four_digit_years_leaves_range_unknown() {
    let trip = normalize_trip(&json!({
        "id": "half",
        "startDate": "2024-03-01",
        "endDate": 300_000_000_000_000i64
    }));
    assert!(trip.start_date.is_some());
    assert_eq!(trip.end_date, None);
    assert!(aggregate(&trip).unwrap().daily_breakdown.is_empty());
}
