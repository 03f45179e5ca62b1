//! roam-ingest: turns arbitrarily shaped trip/stop/activity records from
//! upstream APIs into the canonical model.

pub mod category_rules;
pub mod coerce;
pub mod envelope;
pub mod fields;
pub mod normalize;
pub mod types;

pub use category_rules::categorize;
pub use coerce::{parse_date, safe_number};
pub use envelope::{EnvelopeRules, unwrap_collection, unwrap_trips};
pub use normalize::{attach_stops, normalize, normalize_activity, normalize_stop, normalize_trip, normalize_trips};
pub use types::{Canonical, RawRecord, RecordKind};
