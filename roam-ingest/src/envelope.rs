//! Locate the record collection inside a response envelope.
//!
//! Upstream responses may be a bare array or wrap the collection under one
//! of several keys. Anything unrecognised resolves to an empty sequence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RawRecord;

/// Ordered container keys plus a domain suffix (`user_trips`, `booked_trips`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeRules {
    pub container_keys: Vec<String>,
    /// Keys ending with this suffix are tried last, in lexicographic order
    pub domain_suffix: String,
}

impl Default for EnvelopeRules {
    fn default() -> Self {
        Self::trips()
    }
}

impl EnvelopeRules {
    pub fn trips() -> Self {
        Self {
            container_keys: vec!["trips".into(), "data".into(), "results".into()],
            domain_suffix: "_trips".into(),
        }
    }

    pub fn stops() -> Self {
        Self {
            container_keys: vec!["stops".into(), "itinerary".into(), "data".into(), "results".into()],
            domain_suffix: "_stops".into(),
        }
    }
}

/// Borrow the collection out of `raw` following `rules`.
pub fn unwrap_collection<'a>(raw: &'a RawRecord, rules: &EnvelopeRules) -> &'a [RawRecord] {
    if let Some(items) = raw.as_array() {
        return items;
    }

    if let Some(obj) = raw.as_object() {
        for key in &rules.container_keys {
            if let Some(items) = obj.get(key).and_then(Value::as_array) {
                return items;
            }
        }

        if !rules.domain_suffix.is_empty() {
            let mut domain_keys: Vec<&String> = obj
                .iter()
                .filter(|(k, v)| k.ends_with(rules.domain_suffix.as_str()) && v.is_array())
                .map(|(k, _)| k)
                .collect();
            domain_keys.sort();
            if let Some(items) = domain_keys
                .first()
                .and_then(|k| obj.get(k.as_str()))
                .and_then(Value::as_array)
            {
                return items;
            }
        }
    }

    tracing::debug!(shape = value_kind(raw), "unknown envelope shape, no records");
    &[]
}

/// Trip collection with the default rules.
pub fn unwrap_trips(raw: &RawRecord) -> &[RawRecord] {
    unwrap_collection(raw, &EnvelopeRules::trips())
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
