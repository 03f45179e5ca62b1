//! roam-core: canonical itinerary types, lifecycle classification, calendar
//! projection and the itinerary timeline.
//!
//! Every function here is pure. The reference instant is always an argument;
//! nothing reads the wall clock.

pub mod calendar;
pub mod error;
pub mod status;
pub mod time;
pub mod timeline;
pub mod trip;
pub mod trip_list;
pub mod warnings;

pub use calendar::{CalendarTile, activities_on, calendar_tile, month_grid};
pub use error::PreconditionViolation;
pub use status::{DerivedStatus, classify, classify_stop, classify_trip};
pub use time::{DateRange, start_of_day};
pub use timeline::{
    DayEntry, DayTimeline, StopEntry, Timeline, build_day_timeline, build_timeline,
    chronological_stops, day_index,
};
pub use trip::{CanonicalActivity, CanonicalStop, CanonicalTrip, Category};
pub use trip_list::{TripQuery, TripSort, query_trips};
pub use warnings::{RangeWarning, check_ranges};
