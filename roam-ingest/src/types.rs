use roam_core::{CanonicalActivity, CanonicalStop, CanonicalTrip};
use serde::{Deserialize, Serialize};

/// An arbitrarily shaped record as decoded from some upstream API.
pub type RawRecord = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Trip,
    Stop,
    Activity,
}

/// Output of [`crate::normalize`], tagged by the kind that was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Canonical {
    Trip(CanonicalTrip),
    Stop(CanonicalStop),
    Activity(CanonicalActivity),
}

impl Canonical {
    pub fn kind(&self) -> RecordKind {
        match self {
            Canonical::Trip(_) => RecordKind::Trip,
            Canonical::Stop(_) => RecordKind::Stop,
            Canonical::Activity(_) => RecordKind::Activity,
        }
    }
}
