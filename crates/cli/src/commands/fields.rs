// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Building entity bodies from command-line fields.
//!
//! `key=value` sets a string, `key:=value` sets raw JSON. `--json` supplies
//! an object the individual fields are layered over. Event dates are sent as
//! epoch milliseconds, whatever form they were typed in.

use serde_json::{Map, Value};

use em_core::normalize::parse_date_field;

use crate::cli::FieldArgs;
use crate::error::{Error, Result};

const DATE_KEYS: [&str; 4] = ["begin-date", "end-date", "begin_date", "end_date"];

/// Identifier key of every stored entity.
pub const ID_KEY: &str = "_id";

/// Parse a single `key=value` or `key:=json` field.
pub fn parse_field(field: &str) -> Result<(String, Value)> {
    let (key, raw) = field
        .split_once('=')
        .ok_or_else(|| Error::InvalidField(field.to_string()))?;

    let (key, value) = match key.strip_suffix(':') {
        Some(key) => (
            key,
            serde_json::from_str(raw).map_err(|_| Error::InvalidField(field.to_string()))?,
        ),
        None => (key, Value::String(raw.to_string())),
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidField(field.to_string()));
    }
    Ok((key.to_string(), value))
}

/// Collect `--json` and the individual fields into one object.
pub fn parse_fields(args: &FieldArgs) -> Result<Map<String, Value>> {
    let mut map = match &args.json {
        Some(text) => match serde_json::from_str(text)? {
            Value::Object(map) => map,
            _ => return Err(Error::InvalidField(text.clone())),
        },
        None => Map::new(),
    };

    for field in &args.fields {
        let (key, value) = parse_field(field)?;
        map.insert(key, value);
    }

    for key in DATE_KEYS {
        if let Some(Value::String(text)) = map.get(key) {
            let millis = parse_date_field(text)?;
            map.insert(key.to_string(), Value::from(millis));
        }
    }

    Ok(map)
}

/// Fields as an entity body.
pub fn entity(args: &FieldArgs) -> Result<Value> {
    Ok(Value::Object(parse_fields(args)?))
}

/// Fields as the body of an existing entity. `id` wins over any `_id` field.
pub fn entity_with_id(args: &FieldArgs, id: &str) -> Result<Value> {
    let mut map = parse_fields(args)?;
    map.insert(ID_KEY.to_string(), Value::String(id.to_string()));
    Ok(Value::Object(map))
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
