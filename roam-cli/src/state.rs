use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use roam_core::CanonicalTrip;
use roam_ingest::{EnvelopeRules, RawRecord, attach_stops, normalize_trips, parse_date};
use std::fs;
use std::path::{Path, PathBuf};

/// `$ROAM_HOME`, else `~/.roam`.
pub fn roam_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("ROAM_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".roam"))
}

pub fn ensure_roam_home() -> Result<PathBuf> {
    let dir = roam_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn read_json(path: &Path) -> Result<RawRecord> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {} as JSON", path.display()))
}

pub fn load_trips(path: &Path, rules: &EnvelopeRules) -> Result<Vec<CanonicalTrip>> {
    let raw = read_json(path)?;
    let trips = normalize_trips(&raw, rules);
    tracing::info!(count = trips.len(), input = %path.display(), "loaded trips");
    Ok(trips)
}

/// Pick one trip by id (or the first one), optionally replacing its stops
/// with a separately fetched stop collection.
pub fn select_trip(
    trips: Vec<CanonicalTrip>,
    id: Option<&str>,
    stops: Option<&Path>,
) -> Result<CanonicalTrip> {
    let trip = match id {
        Some(id) => trips
            .into_iter()
            .find(|t| t.id == id)
            .with_context(|| format!("no trip with id {id}"))?,
        None => trips.into_iter().next().context("input contains no trips")?,
    };
    match stops {
        Some(path) => Ok(attach_stops(trip, &read_json(path)?)),
        None => Ok(trip),
    }
}

/// `--now` accepts anything the ingest date parser does; absent means the wall clock.
pub fn parse_now(arg: Option<&str>) -> Result<DateTime<Utc>> {
    match arg {
        Some(s) => parse_date(&RawRecord::from(s)).with_context(|| format!("invalid --now value: {s}")),
        None => Ok(Utc::now()),
    }
}

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").with_context(|| format!("invalid date (want YYYY-MM-DD): {s}"))
}

/// `YYYY-MM`, or the month the trip starts in when absent.
pub fn parse_month(arg: Option<&str>, trip: &CanonicalTrip) -> Result<(i32, u32)> {
    let Some(s) = arg else {
        let start = trip
            .start_date
            .context("trip has no start date; pass --month YYYY-MM")?;
        return Ok((start.year(), start.month()));
    };
    let Some((year, month)) = s.trim().split_once('-') else {
        bail!("invalid month (want YYYY-MM): {s}");
    };
    let year: i32 = year.parse().with_context(|| format!("invalid year in {s}"))?;
    let month: u32 = month.parse().with_context(|| format!("invalid month in {s}"))?;
    if !(1..=12).contains(&month) {
        bail!("month out of range: {s}");
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        let trip = CanonicalTrip::new("t", "x");
        assert_eq!(parse_month(Some("2024-04"), &trip).unwrap(), (2024, 4));
        assert!(parse_month(Some("2024-13"), &trip).is_err());
        assert!(parse_month(Some("April"), &trip).is_err());
        assert!(parse_month(None, &trip).is_err());
    }

    #[test]
    fn test_parse_now() {
        let now = parse_now(Some("2024-06-01")).unwrap();
        assert_eq!(now.to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert!(parse_now(Some("soon")).is_err());
    }

    #[test]
    fn test_select_trip() {
        let trips = vec![CanonicalTrip::new("a", "A"), CanonicalTrip::new("b", "B")];
        assert_eq!(select_trip(trips.clone(), None, None).unwrap().id, "a");
        assert_eq!(select_trip(trips.clone(), Some("b"), None).unwrap().id, "b");
        assert!(select_trip(trips, Some("c"), None).is_err());
        assert!(select_trip(Vec::new(), None, None).is_err());
    }
}
