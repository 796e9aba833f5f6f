// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed views over normalized payloads.
//!
//! The server stores free-form documents, so every view keeps the fields it
//! does not know about in a flattened `extra` map. Dates are the
//! epoch-millisecond values written by [`crate::normalize::normalize_dates`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::normalize::app_error;

/// An event and its attendee roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "begin-date", default, skip_serializing_if = "Option::is_none")]
    pub begin_date: Option<i64>,
    #[serde(rename = "end-date", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<Person>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Start of the event, if the server sent one.
    pub fn begins_at(&self) -> Option<DateTime<Utc>> {
        self.begin_date.and_then(DateTime::from_timestamp_millis)
    }

    /// End of the event, if the server sent one.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end_date.and_then(DateTime::from_timestamp_millis)
    }

    /// Looks up a person on the roster by identifier.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id.as_deref() == Some(id))
    }
}

/// A ticket holder. Accessed as a ticket through its event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Person {
    /// Returns a string attribute. Absent and non-string attributes are `None`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

/// A ticket is a person seen through a specific event.
pub type Ticket = Person;

/// A named server-side configuration value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An application user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-form server metadata.
pub type Info = Map<String, Value>;

/// Outcome of a completed HTTP exchange.
///
/// A 2xx response either carries data or an `{"error": ...}` envelope.
/// Transport failures never produce a `Reply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Normalized payload.
    Data(Value),
    /// Error envelope, exactly as the server sent it.
    Failed(Value),
}

impl Reply {
    /// Classifies a normalized payload.
    pub fn from_normalized(payload: Value) -> Self {
        if app_error(&payload).is_some() {
            Reply::Failed(payload)
        } else {
            Reply::Data(payload)
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Reply::Failed(_))
    }

    /// The raw payload, whichever arm it is.
    pub fn value(&self) -> &Value {
        match self {
            Reply::Data(v) | Reply::Failed(v) => v,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Reply::Data(v) | Reply::Failed(v) => v,
        }
    }

    /// Decodes the data arm into a typed view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] for an error envelope and [`Error::Json`]
    /// when the payload does not match `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Reply::Data(v) => Ok(serde_json::from_value(v)?),
            Reply::Failed(v) => Err(Error::Server(describe_error(&v))),
        }
    }
}

/// Renders the `error` field of an envelope for display.
pub fn describe_error(envelope: &Value) -> String {
    match app_error(envelope) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => envelope.to_string(),
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
