// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Messages pushed over the live-update stream.
//!
//! The server decides what an update contains; the client only guarantees
//! the frame decoded to JSON and hands it on unmodified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A decoded live-update frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateMessage(Value);

impl UpdateMessage {
    /// Decodes a text frame.
    pub fn decode(text: &str) -> Result<Self> {
        Ok(UpdateMessage(serde_json::from_str(text)?))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl From<Value> for UpdateMessage {
    fn from(value: Value) -> Self {
        UpdateMessage(value)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
