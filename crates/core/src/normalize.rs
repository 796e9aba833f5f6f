// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Response normalization for decoded server payloads.
//!
//! The server wraps most payloads in envelopes (`{"events": [...]}`,
//! `{"person": {...}}`) and sends dates in whatever form the storage layer
//! produced. Everything here reshapes a decoded [`Value`] into the shape the
//! rest of the client consumes. None of these functions fail: fields that are
//! missing stay missing.
//!
//! A top-level object carrying a non-null `error` field is an application
//! error reported inside a successful response. [`Normalizer::apply`] hands it
//! back untouched for every variant so the caller can inspect it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Date fields that are mirrored under an underscored key.
const DATE_FIELDS: [(&str, &str); 2] = [("begin-date", "begin_date"), ("end-date", "end_date")];

/// Field carrying an application-level error.
pub const ERROR_FIELD: &str = "error";

/// Reference to a normalization function, stored in operation descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Pass the decoded body through.
    Identity,
    /// `{"events": [...]}` to a list of date-normalized events.
    EventList,
    /// A single event with date fields and stripped person attributes.
    SingleEvent,
    /// `{"persons": [...]}` to the bare list.
    GroupedPersons,
    /// `{"persons": [...]}` to the bare list, for the ticket listing.
    TicketList,
    /// `{key: {...}}` to the wrapped entity, `null` when absent.
    Entity(&'static str),
    /// `{key: [...]}` to the wrapped list, `[]` when absent.
    List(&'static str),
    /// `{key: {...}}` to the wrapped mapping, `{}` when absent.
    Singleton(&'static str),
}

impl Normalizer {
    /// Normalize a decoded body.
    ///
    /// Error envelopes are returned unchanged whatever the variant.
    pub fn apply(self, payload: Value) -> Value {
        if app_error(&payload).is_some() {
            return payload;
        }
        match self {
            Normalizer::Identity => identity(payload),
            Normalizer::EventList => normalize_event_list(payload),
            Normalizer::SingleEvent => normalize_single_event(payload),
            Normalizer::GroupedPersons => normalize_grouped_persons(payload),
            Normalizer::TicketList => normalize_ticket_list(payload),
            Normalizer::Entity(key) => unwrap_key(payload, key),
            Normalizer::List(key) => unwrap_list(payload, key),
            Normalizer::Singleton(key) => normalize_singleton(payload, key),
        }
    }
}

/// Returns the `error` field of an error envelope, if any.
pub fn app_error(payload: &Value) -> Option<&Value> {
    payload.get(ERROR_FIELD).filter(|e| !e.is_null())
}

/// Convert `begin-date`/`end-date` to epoch milliseconds, in place.
///
/// Each converted value is written under both the hyphenated and the
/// underscored key. Running this twice gives the same result.
pub fn normalize_dates(obj: &mut Value) {
    let Some(map) = obj.as_object_mut() else {
        return;
    };
    for (hyphenated, underscored) in DATE_FIELDS {
        let Some(millis) = map.get(hyphenated).and_then(epoch_millis) else {
            continue;
        };
        map.insert(hyphenated.to_string(), Value::from(millis));
        map.insert(underscored.to_string(), Value::from(millis));
    }
}

/// Unwrap an events envelope into its list.
pub fn normalize_event_list(payload: Value) -> Value {
    if app_error(&payload).is_some() {
        return payload;
    }
    let mut events = take_list(payload, "events");
    for event in &mut events {
        normalize_dates(event);
    }
    Value::Array(events)
}

/// Normalize a single event and drop empty person attributes.
pub fn normalize_single_event(mut payload: Value) -> Value {
    normalize_dates(&mut payload);
    if let Some(persons) = payload.get_mut("persons").and_then(Value::as_array_mut) {
        for person in persons.iter_mut().filter_map(Value::as_object_mut) {
            strip_empty(person);
        }
    }
    payload
}

/// Unwrap `{"persons": [...]}`. Attributes are left as sent.
pub fn normalize_grouped_persons(payload: Value) -> Value {
    Value::Array(take_list(payload, "persons"))
}

/// Unwrap the cross-event ticket listing.
pub fn normalize_ticket_list(payload: Value) -> Value {
    if app_error(&payload).is_some() {
        return payload;
    }
    Value::Array(take_list(payload, "persons"))
}

/// Unwrap `{key: value}`, defaulting to an empty mapping.
pub fn normalize_singleton(payload: Value, key: &str) -> Value {
    if app_error(&payload).is_some() {
        return payload;
    }
    match take_field(payload, key) {
        Some(value) if !value.is_null() => value,
        _ => Value::Object(Map::new()),
    }
}

/// Unwrap `{key: value}`, defaulting to `null`.
pub fn unwrap_key(payload: Value, key: &str) -> Value {
    take_field(payload, key).unwrap_or(Value::Null)
}

/// Unwrap `{key: [...]}` with error passthrough, defaulting to `[]`.
pub fn unwrap_list(payload: Value, key: &str) -> Value {
    if app_error(&payload).is_some() {
        return payload;
    }
    Value::Array(take_list(payload, key))
}

/// Decode-only passthrough.
pub fn identity(payload: Value) -> Value {
    payload
}

/// Remove every attribute whose value is exactly the empty string.
fn strip_empty(record: &mut Map<String, Value>) {
    record.retain(|_, value| value.as_str() != Some(""));
}

fn take_field(payload: Value, key: &str) -> Option<Value> {
    match payload {
        Value::Object(mut map) => map.remove(key),
        _ => None,
    }
}

fn take_list(payload: Value, key: &str) -> Vec<Value> {
    match take_field(payload, key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Interpret a date-like value as epoch milliseconds.
fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_date(s),
        _ => None,
    }
}

/// Parse the date strings the server is known to emit.
pub fn parse_date(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Parse a caller-supplied date, rejecting anything [`parse_date`] does not accept.
pub fn parse_date_field(text: &str) -> Result<i64> {
    parse_date(text).ok_or_else(|| Error::InvalidDate(text.to_string()))
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
