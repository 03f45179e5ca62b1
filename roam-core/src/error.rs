//! Errors raised when canonical input did not come through the normalizer.

use thiserror::Error;

/// Programming error: a record reached the engine without being normalized.
///
/// User-facing data problems never produce this; they are recovered during
/// normalization or reported as [`crate::RangeWarning`]s.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreconditionViolation {
    #[error("{kind} record has an empty id")]
    EmptyId { kind: &'static str },

    #[error("duplicate stop id: {0}")]
    DuplicateStopId(String),

    #[error("invalid amount in '{record}' field {field}: {value}")]
    InvalidAmount {
        record: String,
        field: &'static str,
        value: f64,
    },

    #[error("trip '{trip_id}' starts after it ends")]
    InvertedTripRange { trip_id: String },
}
