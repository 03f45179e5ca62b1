//! Plain-text rendering for terminal output.

use chrono::{DateTime, Datelike, Utc};
use roam_budget::{BudgetSummary, TripSetOverview};
use roam_core::{
    CalendarTile, CanonicalActivity, CanonicalTrip, DayTimeline, RangeWarning, Timeline,
    classify_trip,
};

fn date_or_unknown(d: Option<DateTime<Utc>>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn activity_line(a: &CanonicalActivity) -> String {
    let mut line = format!("    - {} [{}] ${:.2}", a.name, a.category, a.cost);
    if let Some(d) = &a.duration_label {
        line.push_str(&format!(" ({d})"));
    }
    line
}

fn print_warnings(warnings: &[RangeWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\nWarnings:");
    for w in warnings {
        println!("  ! {w}");
    }
}

pub fn print_trips(trips: &[&CanonicalTrip], now: DateTime<Utc>) {
    if trips.is_empty() {
        println!("No trips match.");
        return;
    }
    for t in trips {
        println!(
            "{:<12} {:<10} {} → {}  ${:>10.2}  {}{}",
            t.id,
            classify_trip(t, now).label(),
            date_or_unknown(t.start_date),
            date_or_unknown(t.end_date),
            t.planned_budget,
            t.title,
            t.destination
                .as_deref()
                .map(|d| format!(" ({d})"))
                .unwrap_or_default()
        );
    }
}

pub fn print_budget(trip: &CanonicalTrip, s: &BudgetSummary) {
    println!("{} ({})", trip.title, trip.id);
    println!(
        "Total ${:.2} of ${:.2} planned: {} ({:.0}% used, ${:.2} remaining)",
        s.total,
        s.planned_budget,
        s.status,
        s.utilization * 100.0,
        s.remaining
    );

    println!("\nBy category:");
    for (category, share) in s.category_shares() {
        let amount = s.by_category.get(&category).copied().unwrap_or(0.0);
        println!("  {:<16} ${:>10.2}  {:>5.1}%", category.label(), amount, share * 100.0);
    }

    println!("\nBy stop:");
    for stop in &trip.stops {
        let amount = s.by_stop.get(&stop.id).copied().unwrap_or(0.0);
        println!("  {:<24} ${:>10.2}", stop.location, amount);
    }

    if !s.daily_breakdown.is_empty() {
        println!("\nDaily (avg ${:.2}):", s.daily_average);
        for day in &s.daily_breakdown {
            println!(
                "  {}  ${:>10.2}  {}",
                day.date,
                day.amount,
                day.activity_names.join(", ")
            );
        }
    }
    print_warnings(&s.warnings);
}

pub fn print_timeline(trip: &CanonicalTrip, timeline: &Timeline) {
    println!("{} ({})", trip.title, trip.id);
    for entry in &timeline.entries {
        let day = entry
            .day_index
            .map(|i| format!("Day {i}"))
            .unwrap_or_else(|| "Day ?".to_string());
        println!(
            "\n{day}: {} ({} → {})",
            entry.stop.location,
            date_or_unknown(entry.stop.start_date),
            date_or_unknown(entry.stop.end_date)
        );
        for a in &entry.activities {
            println!("{}", activity_line(a));
        }
    }
    print_warnings(&timeline.warnings);
}

pub fn print_day_timeline(trip: &CanonicalTrip, timeline: &DayTimeline) {
    println!("{} ({})", trip.title, trip.id);
    if timeline.days.is_empty() {
        println!("Trip dates unknown.");
    }
    for day in &timeline.days {
        let place = day.stop.as_ref().map(|s| s.location.as_str()).unwrap_or("-");
        println!("\nDay {} {} {}", day.day_index, day.date, place);
        for a in &day.activities {
            println!("{}", activity_line(a));
        }
    }
    print_warnings(&timeline.warnings);
}

/// Monday-first month grid. `*` marks trip days, `[ ]` the selected day.
pub fn print_calendar(year: i32, month: u32, tiles: &[CalendarTile]) {
    println!("{year}-{month:02}");
    println!(" Mo    Tu    We    Th    Fr    Sa    Su");
    let Some(first) = tiles.first() else {
        return;
    };
    let lead = first.date.weekday().num_days_from_monday() as usize;
    let mut line = "      ".repeat(lead);
    for tile in tiles {
        let mark = if tile.in_trip { '*' } else { ' ' };
        let count = match tile.activity_count {
            0 => ' ',
            n if n < 10 => char::from_digit(n as u32, 10).unwrap_or('+'),
            _ => '+',
        };
        let cell = format!("{:>2}{mark}{count}", tile.date.day());
        if tile.is_selected {
            line.push_str(&format!("[{cell}]"));
        } else {
            line.push_str(&format!(" {cell} "));
        }
        if tile.date.weekday().num_days_from_monday() == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
}

pub fn print_overview(o: &TripSetOverview) {
    println!(
        "{} trips: {} upcoming, {} ongoing, {} completed",
        o.total_trips, o.upcoming, o.ongoing, o.completed
    );
    println!(
        "Planned ${:.2}, estimated ${:.2} ({} over budget)",
        o.total_planned_budget, o.total_estimated_cost, o.over_budget
    );
    if !o.destinations.is_empty() {
        println!("Destinations: {}", o.destinations.join(", "));
    }
}
